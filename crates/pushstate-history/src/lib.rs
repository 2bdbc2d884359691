//! pushstate History Façade
//!
//! Wraps the host's session-history primitive:
//! - Push: normalize the URL against the document root, merge the URL and
//!   title into the state payload, broadcast `push`, hand off to the host
//! - Pop: record the host-delivered state and broadcast `pop`
//! - Hosts without push-state support fall back to `#!<url>` fragments
//!
//! Cross-origin pushes are refused when the pushed hostname differs from the
//! configured top-level domain.

mod config;
mod error;
mod events;
mod navigation;
mod normalize;

pub use config::HistoryConfig;
pub use error::HistoryError;
pub use events::{EventKind, HistoryEvent, ListenerId};
pub use navigation::{NavigationState, PushOutcome};
pub use normalize::{resolve_document_root, UrlNormalizer};

pub use pushstate_host::{NavigationHost, PopEvent, StateMap};

/// State key holding the normalized URL of a pushed entry
pub const HISTORY_STATE_URL: &str = "historyStateURL";

/// State key holding the title of a pushed entry
pub const HISTORY_STATE_TITLE: &str = "historyStateTitle";

pub type Result<T> = std::result::Result<T, HistoryError>;
