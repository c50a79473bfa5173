//! Minimal embedding example for zonedrift-core
//!
//! Demonstrates using the orchestrator as a library in a custom
//! application: classify a record list, register a provider, dispatch one
//! update fan-out, and drain it. The no-op provider makes this safe to
//! run anywhere.

use std::sync::Arc;

use zonedrift_core::{Updater, parse_domains};
use zonedrift_provider_noop::{NoopProvider, PROVIDER_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let records = vec![
        "example.com".to_string(),
        "www.example.com".to_string(),
        "api.example.org".to_string(),
    ];

    // Classification groups records per registrable domain.
    let domains = parse_domains(&records, PROVIDER_NAME)?;
    for domain in &domains {
        println!("{} -> {:?}", domain.name, domain.records);
    }

    let mut updater = Updater::new();
    updater.register_provider(Arc::new(NoopProvider::new()));
    updater.register_domains(domains);

    // One fan-out, then drain it before exiting.
    updater.update("demo-run", "203.0.113.7".parse()?);
    updater.stop().await;

    println!("update drained");
    Ok(())
}
