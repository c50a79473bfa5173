// # IP Checker Trait
//
// Defines the interface for detecting external IP changes.
//
// ## Implementations
//
// - HTTP endpoint lookup: `zonedrift-ip-http` crate
//
// The checker performs one lookup per call; the caller owns the known-IP
// state and the cadence. `changed == false` is the expected steady state
// on most runs and must not be logged above debug severity by callers.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of a single external-IP check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpCheck {
    /// The externally visible address the lookup reported
    pub observed: IpAddr,

    /// Whether it differs from the caller's known address
    pub changed: bool,
}

/// Trait for external IP checkers
#[async_trait]
pub trait IpChecker: Send + Sync {
    /// Performs one blocking lookup against the configured source and
    /// compares the observed address to `known_ip` (`None` on first run,
    /// which always counts as changed).
    ///
    /// Fails with [`Error::Lookup`] if the source is unreachable or does
    /// not answer with a valid IP address.
    ///
    /// [`Error::Lookup`]: crate::Error::Lookup
    async fn ip_has_changed(&self, known_ip: Option<IpAddr>) -> Result<IpCheck>;
}
