// # Provider Trait
//
// Defines the interface for reading and rewriting DNS records via
// provider APIs.
//
// ## Implementations
//
// - No-op: `zonedrift-provider-noop` crate (dry runs, tests)
// - Future: Cloudflare, DigitalOcean, Route53, etc.
//
// Providers are thin adapters over their upstream REST API and stay
// oblivious to scheduling: whether an update is necessary at all is
// decided by the orchestrator, which compares each record's content to
// the target address before calling `update_record`.

use async_trait::async_trait;

use crate::domain::Domain;
use crate::error::Result;
use crate::record::ProviderRecord;

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe: one provider instance may serve
/// several concurrently updating domains.
///
/// # Failure Semantics
///
/// Upstream failures surface as [`Error::Provider`]; the orchestrator
/// recovers per domain and never retries within a run.
///
/// [`Error::Provider`]: crate::Error::Provider
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used as the registration key and for matching
    /// domains to providers (e.g. "noop", "cloudflare").
    fn name(&self) -> &'static str;

    /// Fetch the provider's current A records under `domain.name`,
    /// filtered to the configured labels via [`Domain::has_record`].
    ///
    /// Must not mutate upstream state, and must not cache: record ids
    /// are only valid within the run that fetched them.
    async fn records(&self, domain: &Domain) -> Result<Vec<ProviderRecord>>;

    /// Push `record.content` as the new value for the upstream record
    /// identified by `record.id` (plus any provider-private data carried
    /// in `record.metadata`).
    ///
    /// # Idempotency
    ///
    /// Calling this twice with the same content must be a no-op
    /// upstream.
    async fn update_record(&self, record: &ProviderRecord) -> Result<()>;
}
