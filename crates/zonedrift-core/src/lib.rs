// # zonedrift-core
//
// Core library for the polling DDNS update orchestrator.
//
// ## Architecture Overview
//
// - **Domain / parse_domains**: classifies raw record strings into
//   (registrable domain, label) groupings via the public suffix list
// - **Provider**: trait for reading and rewriting a provider's A records
// - **IpChecker**: trait for detecting external IP changes
// - **Updater**: orchestrates the IP change → provider update fan-out,
//   isolating failures per domain and draining in-flight work on stop
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the fixed-interval trigger and the
//    wire-level provider APIs live outside this crate; the daemon wires
//    them up through the traits above
// 2. **Failure Isolation**: one domain's failed update never aborts a
//    sibling domain's update in the same run
// 3. **Fresh State**: provider records are re-fetched on every run, never
//    cached, so updates never act on stale record ids

pub mod domain;
pub mod error;
pub mod record;
pub mod traits;
pub mod updater;

// Re-export core types for convenience
pub use domain::{APEX, Domain, parse_domains};
pub use error::{Error, Result};
pub use record::ProviderRecord;
pub use traits::{IpCheck, IpChecker, Provider};
pub use updater::Updater;
