//! History error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Top level domain name must match the primary domain name: {found} (expected {expected})")]
    DomainMismatch { found: String, expected: String },

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Navigation history is not supported by the host")]
    Unsupported,

    #[error("Host error: {0}")]
    Host(#[from] pushstate_host::HostError),
}
