//! Host navigation primitive contract

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;

/// State payload stored alongside a history entry.
pub type StateMap = serde_json::Map<String, serde_json::Value>;

/// A pop notification delivered by the host when the active history entry
/// changes through user or programmatic navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopEvent {
    /// State recorded with the entry that became active, if any
    pub state: Option<StateMap>,
}

impl PopEvent {
    pub fn new(state: Option<StateMap>) -> Self {
        Self { state }
    }
}

/// Pop handler registered by the façade. Returns whether the pop was handled.
pub type PopHandler = Arc<dyn Fn(&PopEvent) -> bool + Send + Sync>;

/// The environment's session-history mechanism.
///
/// Implementations must not hold internal locks while invoking pop handlers,
/// since handlers are free to call back into the host.
pub trait NavigationHost: Send + Sync {
    /// Whether the host exposes a native push-state primitive
    fn supports_history(&self) -> bool;

    /// Hostname of the current location (no scheme, no port)
    fn hostname(&self) -> String;

    /// Push a new entry onto the host history stack
    fn push_state(&self, state: &StateMap, title: &str, url: &str) -> Result<()>;

    /// Set the fragment of the current location (hash-bang fallback)
    fn set_hash(&self, hash: &str);

    fn back(&self);

    fn forward(&self);

    /// Number of entries in the host history stack
    fn length(&self) -> usize;

    /// Register a handler for host-originated pop notifications
    fn subscribe_pop(&self, handler: PopHandler) -> Result<()>;
}
