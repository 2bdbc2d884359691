//! Host error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Navigation history is not supported by the host")]
    Unsupported,

    #[error("Host rejected pushed state: {0}")]
    PushRejected(String),

    #[error("Failed to subscribe to pop notifications: {0}")]
    SubscribeFailed(String),
}
