//! Session history façade
//!
//! One `NavigationState` is built at start-up and cloned into every call
//! site. Clones share the same state.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Weak};

use pushstate_host::{NavigationHost, PopEvent, PopHandler, StateMap};

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::events::{EventBus, EventKind, HistoryEvent, ListenerId};
use crate::normalize::UrlNormalizer;
use crate::{Result, HISTORY_STATE_TITLE, HISTORY_STATE_URL};

/// How a successful push reached the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PushOutcome {
    /// Pushed onto the host history stack with the normalized URL
    Pushed { url: String },
    /// The host has no push-state support; the location hash was set instead
    HashFallback { hash: String },
}

struct Settings {
    normalizer: UrlNormalizer,
    dev_mode: bool,
}

struct Inner {
    host: Arc<dyn NavigationHost>,
    settings: RwLock<Settings>,
    support_override: Option<bool>,
    initialized: RwLock<bool>,
    current_state: RwLock<StateMap>,
    events: EventBus,
}

pub struct NavigationState {
    inner: Arc<Inner>,
}

impl NavigationState {
    /// Validate `config` and wrap `host`.
    pub fn new(host: Arc<dyn NavigationHost>, config: HistoryConfig) -> Result<Self> {
        let normalizer = config.build_normalizer(&host.hostname())?;

        tracing::debug!(
            document_root = %normalizer.document_root(),
            top_level_domain = %normalizer.top_level_domain(),
            "Created navigation state"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                host,
                settings: RwLock::new(Settings {
                    normalizer,
                    dev_mode: config.dev_mode,
                }),
                support_override: config.support_override,
                initialized: RwLock::new(false),
                current_state: RwLock::new(StateMap::new()),
                events: EventBus::default(),
            }),
        })
    }

    /// Start listening for host pops. Returns false when the host has no
    /// history support or refuses the subscription.
    pub fn initialize(&self, dev_mode: bool) -> bool {
        match self.try_initialize(dev_mode) {
            Ok(()) => true,
            Err(e) => {
                self.report(&e, "History initialisation failed");
                false
            }
        }
    }

    pub fn try_initialize(&self, dev_mode: bool) -> Result<()> {
        if !self.supports_history() {
            return Err(HistoryError::Unsupported);
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handler: PopHandler = Arc::new(move |event: &PopEvent| match weak.upgrade() {
            Some(inner) => NavigationState { inner }.handle_pop(event),
            None => false,
        });

        self.inner.host.subscribe_pop(handler)?;

        self.inner.settings.write().dev_mode = dev_mode;
        *self.inner.initialized.write() = true;

        tracing::info!(dev_mode, "History initialized");

        Ok(())
    }

    /// Push a URL with a title and state. Returns whether the push succeeded.
    pub fn push(&self, url: &str, title: &str, state: StateMap) -> bool {
        match self.try_push(url, title, state) {
            Ok(_) => true,
            Err(e) => {
                self.report(&e, "History push failed");
                false
            }
        }
    }

    /// Push a URL with a title and state.
    ///
    /// The URL is normalized first; nothing is recorded if that fails. The
    /// `push` event is broadcast before the host is touched, so listeners see
    /// it even when the host then rejects the entry. `current_state` only
    /// changes once the host has accepted the push.
    pub fn try_push(&self, url: &str, title: &str, state: StateMap) -> Result<PushOutcome> {
        let normalized = self.normalize_url(url, true, true)?;

        let mut merged = state;
        merged.insert(
            HISTORY_STATE_URL.to_string(),
            Value::String(normalized.clone()),
        );
        merged.insert(
            HISTORY_STATE_TITLE.to_string(),
            Value::String(title.to_string()),
        );

        self.inner.events.emit(&HistoryEvent {
            kind: EventKind::Push,
            payload: merged.clone(),
        });

        let outcome = if self.supports_history() {
            self.inner.host.push_state(&merged, title, &normalized)?;
            PushOutcome::Pushed { url: normalized }
        } else {
            let hash = format!("#!{}", url);
            self.inner.host.set_hash(&hash);
            PushOutcome::HashFallback { hash }
        };

        *self.inner.current_state.write() = merged;

        tracing::info!(url = %url, outcome = ?outcome, "Pushed history state");

        Ok(outcome)
    }

    pub fn back(&self) {
        self.inner.host.back();
    }

    pub fn forward(&self) {
        self.inner.host.forward();
    }

    /// Number of entries in the host history stack
    pub fn length(&self) -> usize {
        self.inner.host.length()
    }

    /// Normalize a URL against the current document root and domain guard.
    pub fn normalize_url(
        &self,
        url: &str,
        include_document_root: bool,
        include_trailers: bool,
    ) -> Result<String> {
        self.inner
            .settings
            .read()
            .normalizer
            .normalize(url, include_document_root, include_trailers)
    }

    /// Record a host pop and broadcast it. Failures are logged, not raised.
    pub fn handle_pop(&self, event: &PopEvent) -> bool {
        match self.try_handle_pop(event) {
            Ok(()) => true,
            Err(e) => {
                self.report(&e, "History pop failed");
                false
            }
        }
    }

    fn try_handle_pop(&self, event: &PopEvent) -> Result<()> {
        if !self.supports_history() {
            return Err(HistoryError::Unsupported);
        }

        let payload = event.state.clone().unwrap_or_default();
        *self.inner.current_state.write() = payload.clone();

        tracing::debug!(keys = payload.len(), "Popped history state");

        self.inner.events.emit(&HistoryEvent {
            kind: EventKind::Pop,
            payload,
        });

        Ok(())
    }

    /// Listen for `push` or `pop` notifications.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&HistoryEvent) + Send + Sync + 'static,
    {
        self.inner.events.subscribe(kind, listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.events.unsubscribe(id)
    }

    /// Broadcast a notification to the listeners of `kind` without touching
    /// the host or `current_state`.
    pub fn emit(&self, kind: EventKind, payload: StateMap) {
        self.inner.events.emit(&HistoryEvent { kind, payload });
    }

    // === Configuration ===

    pub fn document_root(&self) -> String {
        self.inner.settings.read().normalizer.document_root().to_string()
    }

    /// Set the document root from a path or a URL on the primary domain.
    /// The previous root is kept on error.
    pub fn set_document_root(&self, document_root: &str) -> Result<()> {
        self.inner
            .settings
            .write()
            .normalizer
            .set_document_root(document_root)
    }

    pub fn top_level_domain(&self) -> String {
        self.inner
            .settings
            .read()
            .normalizer
            .top_level_domain()
            .to_string()
    }

    pub fn set_top_level_domain(&self, top_level_domain: &str) -> Result<()> {
        self.inner
            .settings
            .write()
            .normalizer
            .set_top_level_domain(top_level_domain)
    }

    pub fn observe_top_level_domain(&self) -> bool {
        self.inner
            .settings
            .read()
            .normalizer
            .observe_top_level_domain()
    }

    pub fn set_observe_top_level_domain(&self, observe: bool) {
        self.inner
            .settings
            .write()
            .normalizer
            .set_observe_top_level_domain(observe);
    }

    pub fn dev_mode(&self) -> bool {
        self.inner.settings.read().dev_mode
    }

    pub fn set_dev_mode(&self, dev_mode: bool) {
        self.inner.settings.write().dev_mode = dev_mode;
    }

    pub fn is_initialized(&self) -> bool {
        *self.inner.initialized.read()
    }

    /// Whether pushes reach the host stack natively. Read-only; set
    /// `support_override` in the configuration to force it.
    pub fn supports_history(&self) -> bool {
        self.inner
            .support_override
            .unwrap_or_else(|| self.inner.host.supports_history())
    }

    /// State of the most recent successful push or pop
    pub fn current_state(&self) -> StateMap {
        self.inner.current_state.read().clone()
    }

    fn report(&self, error: &HistoryError, context: &str) {
        if self.dev_mode() {
            tracing::warn!(error = %error, "{}", context);
        } else {
            tracing::debug!(error = %error, "{}", context);
        }
    }
}

impl Clone for NavigationState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
