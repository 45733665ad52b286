use std::sync::Arc;
use std::thread;

use hap_rules::{ProvisioningAttributes, RuleService};

fn main() {
    let service = Arc::new(
        RuleService::load(["aws", "aws(PR=*)->EU", "azure(HR=*)->S"])
            .expect("failed to load rules"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let svc = Arc::clone(&service);
            thread::spawn(move || {
                let plan = if i % 2 == 0 { "aws" } else { "azure" };
                let request = ProvisioningAttributes::new(plan, plan)
                    .platform_region(format!("cf-eu{i}0"))
                    .hyperscaler_region("westeurope");

                let result = svc.matches(&request);
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
