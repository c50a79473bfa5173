//! Provider-facing record type

use serde::{Deserialize, Serialize};

/// A DNS record as reported by a provider
///
/// Instances are produced fresh on every [`Provider::records`] call and
/// never cached across runs; provider-assigned ids can go stale between
/// runs, so updates must always act on a record fetched in the same run.
///
/// [`Provider::records`]: crate::Provider::records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Provider-assigned identifier, opaque to the orchestrator
    pub id: String,

    /// Registrable domain the record lives under
    pub domain: String,

    /// Full record name as reported by the provider
    pub name: String,

    /// Record type; only "A" records are managed
    #[serde(rename = "type")]
    pub record_type: String,

    /// Current record value (an IP address string; empty when unknown)
    pub content: String,

    /// Provider-private data carried through the generic record, e.g. a
    /// zone id some APIs require on update. The orchestrator never
    /// inspects this field.
    #[serde(default)]
    pub metadata: serde_json::Value,
}
