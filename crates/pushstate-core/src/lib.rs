//! pushstate Core
//!
//! Coordination layer: file-backed configuration, logging setup and a
//! single error type over the history, host and docs crates.

mod config;
mod error;

pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use pushstate_docs::{parse_comments, parse_json, CommentBlock, DocsError, Method};
pub use pushstate_history::{
    EventKind, HistoryConfig, HistoryError, HistoryEvent, ListenerId, NavigationState,
    PushOutcome, HISTORY_STATE_TITLE, HISTORY_STATE_URL,
};
pub use pushstate_host::{HostEntry, HostError, MemoryHost, NavigationHost, PopEvent, StateMap};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter`, which falls back to `info`.
pub fn init_logging(default_filter: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or("info")));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
