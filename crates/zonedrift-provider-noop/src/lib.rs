// # No-op DNS Provider
//
// A provider that answers with synthetic records and acknowledges every
// update without touching anything upstream. Useful for dry runs and for
// exercising the orchestrator end to end.
//
// `records` synthesizes one record per configured label with empty
// content. Empty content differs from any real IP address, so every run
// takes the update path through `update_record`, which succeeds
// unconditionally.

use async_trait::async_trait;
use zonedrift_core::{Domain, Provider, ProviderRecord, Result};

/// Provider name used as the registration key
pub const PROVIDER_NAME: &str = "noop";

/// No-op provider
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl NoopProvider {
    /// Create a new no-op provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for NoopProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn records(&self, domain: &Domain) -> Result<Vec<ProviderRecord>> {
        Ok(domain
            .records
            .iter()
            .map(|label| ProviderRecord {
                id: String::new(),
                domain: domain.name.clone(),
                name: label.clone(),
                record_type: "A".to_string(),
                content: String::new(),
                metadata: serde_json::Value::Null,
            })
            .collect())
    }

    async fn update_record(&self, _record: &ProviderRecord) -> Result<()> {
        Ok(())
    }
}
