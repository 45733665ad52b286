use hap_rules::{ProvisioningAttributes, RuleService};

fn main() {
    // Entries may be listed in any order; loading sorts them.
    let service = RuleService::load([
        "aws(PR=cf-eu10,HR=*)->S,EU",
        "aws",
        "aws(PR=cf-eu10)->EU",
        "azure(PR=westeurope)",
        "azure",
    ])
    .expect("failed to load rules");

    println!("{}", service.rules());
    if let Some(err) = service.first_error() {
        println!("{err}");
    }

    // Match a provisioning request
    let request = ProvisioningAttributes::new("aws", "aws")
        .platform_region("cf-eu10")
        .hyperscaler_region("eu-west-2");

    match service.matches(&request) {
        Some(result) => println!("Result: {result}"),
        None => println!("No rule matched."),
    }
}
