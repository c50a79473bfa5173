//! Error types for the zonedrift system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for zonedrift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zonedrift system
#[derive(Error, Debug)]
pub enum Error {
    /// A record string could not be classified into a registrable domain.
    /// Fatal at configuration time: the process must not start with a
    /// record it cannot place.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// External IP lookup failed. Recovered locally: the run is treated
    /// as no-change and retried on the next tick.
    #[error("IP lookup error: {0}")]
    Lookup(String),

    /// A domain references a provider name that was never registered.
    /// Recovered locally per domain.
    #[error("no provider registered under name: {0}")]
    ProviderNotFound(String),

    /// An upstream provider API call failed. Recovered locally per
    /// domain, fail-fast within that domain's records.
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network-related errors
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid-record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create an IP lookup error
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Create a provider-not-found error
    pub fn provider_not_found(name: impl Into<String>) -> Self {
        Self::ProviderNotFound(name.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
