//! Load a YAML rules file and match one request against it.
//!
//! ```text
//! cargo run --example check -- rules.yaml aws aws cf-eu10 eu-west-2
//! ```
//!
//! Set `RUST_LOG=hap_rules=debug` to see every parsed entry.

use std::process::ExitCode;

use hap_rules::{ParserKind, ProvisioningAttributes, RuleService};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path, plan, hyperscaler, rest @ ..] = args.as_slice() else {
        eprintln!("usage: check <rules.yaml> <plan> <hyperscaler> [platform-region] [hyperscaler-region]");
        return ExitCode::FAILURE;
    };

    let parser = match std::env::var("HAP_PARSER").as_deref() {
        Ok("naive") => ParserKind::Naive,
        _ => ParserKind::Grammar,
    };

    let service = match RuleService::builder().parser(parser).load_file(path) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (text, message) in service.errors() {
        println!("{text}: {message}");
    }

    let mut request = ProvisioningAttributes::new(plan.as_str(), hyperscaler.as_str());
    if let Some(pr) = rest.first() {
        request = request.platform_region(pr.as_str());
    }
    if let Some(hr) = rest.get(1) {
        request = request.hyperscaler_region(hr.as_str());
    }

    let report = service.match_detailed(&request);
    println!("{report}");

    if service.first_error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
