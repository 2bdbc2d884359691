//! In-memory navigation host
//!
//! Models a browser session-history stack: one initial entry, pushes drop
//! any forward entries, and back/forward fire pop notifications carrying the
//! state of the entry that became active.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::{NavigationHost, PopEvent, PopHandler, StateMap};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEntry {
    pub url: String,
    pub title: String,
    /// State pushed with the entry; the initial entry has none
    pub state: Option<StateMap>,
    pub pushed_at: DateTime<Utc>,
}

impl HostEntry {
    fn initial() -> Self {
        Self {
            url: "/".to_string(),
            title: String::new(),
            state: None,
            pushed_at: Utc::now(),
        }
    }
}

struct Stack {
    entries: Vec<HostEntry>,
    index: usize,
    hash: String,
}

pub struct MemoryHost {
    hostname: String,
    supported: bool,
    stack: RwLock<Stack>,
    handlers: RwLock<Vec<PopHandler>>,
    push_failure: RwLock<Option<String>>,
    subscribe_failure: RwLock<Option<String>>,
}

impl MemoryHost {
    /// Create a host with native push-state support
    pub fn new(hostname: impl Into<String>) -> Self {
        Self::with_support(hostname, true)
    }

    /// Create a host without push-state support (hash-bang only)
    pub fn unsupported(hostname: impl Into<String>) -> Self {
        Self::with_support(hostname, false)
    }

    fn with_support(hostname: impl Into<String>, supported: bool) -> Self {
        Self {
            hostname: hostname.into(),
            supported,
            stack: RwLock::new(Stack {
                entries: vec![HostEntry::initial()],
                index: 0,
                hash: String::new(),
            }),
            handlers: RwLock::new(Vec::new()),
            push_failure: RwLock::new(None),
            subscribe_failure: RwLock::new(None),
        }
    }

    /// Make subsequent pushes fail with the given reason
    pub fn fail_pushes_with(&self, reason: impl Into<String>) {
        *self.push_failure.write() = Some(reason.into());
    }

    pub fn clear_push_failure(&self) {
        *self.push_failure.write() = None;
    }

    /// Make subsequent pop subscriptions fail with the given reason
    pub fn fail_subscriptions_with(&self, reason: impl Into<String>) {
        *self.subscribe_failure.write() = Some(reason.into());
    }

    /// Snapshot of every entry in the stack
    pub fn entries(&self) -> Vec<HostEntry> {
        self.stack.read().entries.clone()
    }

    /// The active entry
    pub fn current(&self) -> HostEntry {
        let stack = self.stack.read();
        stack.entries[stack.index].clone()
    }

    pub fn index(&self) -> usize {
        self.stack.read().index
    }

    /// Fragment last set through [`NavigationHost::set_hash`]
    pub fn location_hash(&self) -> String {
        self.stack.read().hash.clone()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Deliver a pop notification to every subscribed handler, as a browser
    /// does on `popstate`. Returns each handler's result in order.
    pub fn dispatch_pop(&self, event: &PopEvent) -> Vec<bool> {
        // Handlers may call back into the host, so release the lock first
        let handlers: Vec<PopHandler> = self.handlers.read().clone();
        handlers.iter().map(|handler| handler(event)).collect()
    }

    fn step(&self, delta: isize) {
        let state = {
            let mut stack = self.stack.write();
            let Some(target) = stack.index.checked_add_signed(delta) else {
                return;
            };
            if target >= stack.entries.len() {
                return;
            }
            stack.index = target;
            stack.entries[target].state.clone()
        };

        tracing::debug!(delta, "Host history traversal");

        self.dispatch_pop(&PopEvent::new(state));
    }
}

impl NavigationHost for MemoryHost {
    fn supports_history(&self) -> bool {
        self.supported
    }

    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn push_state(&self, state: &StateMap, title: &str, url: &str) -> Result<()> {
        if !self.supported {
            return Err(HostError::Unsupported);
        }

        if let Some(reason) = self.push_failure.read().as_ref() {
            return Err(HostError::PushRejected(reason.clone()));
        }

        let mut stack = self.stack.write();
        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(HostEntry {
            url: url.to_string(),
            title: title.to_string(),
            state: Some(state.clone()),
            pushed_at: Utc::now(),
        });
        stack.index = stack.entries.len() - 1;

        tracing::debug!(url = %url, length = stack.entries.len(), "Host pushed entry");

        Ok(())
    }

    fn set_hash(&self, hash: &str) {
        self.stack.write().hash = hash.to_string();
    }

    fn back(&self) {
        self.step(-1);
    }

    fn forward(&self) {
        self.step(1);
    }

    fn length(&self) -> usize {
        self.stack.read().entries.len()
    }

    fn subscribe_pop(&self, handler: PopHandler) -> Result<()> {
        if let Some(reason) = self.subscribe_failure.read().as_ref() {
            return Err(HostError::SubscribeFailed(reason.clone()));
        }

        self.handlers.write().push(handler);
        Ok(())
    }
}
