//! In-process push/pop notifications

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use pushstate_host::StateMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A state was pushed through the façade
    Push,
    /// The host popped to a previously pushed state
    Pop,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::Pop => "pop",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub kind: EventKind,
    pub payload: StateMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&HistoryEvent) + Send + Sync>;

#[derive(Default)]
pub(crate) struct EventBus {
    listeners: RwLock<Vec<(ListenerId, EventKind, Listener)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub(crate) fn subscribe<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&HistoryEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, kind, Arc::new(listener)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Deliver an event to the listeners of its kind, in subscription order.
    pub(crate) fn emit(&self, event: &HistoryEvent) {
        // Snapshot so listeners can subscribe, unsubscribe or push re-entrantly
        let targets: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(kind = %event.kind, listeners = targets.len(), "Emitting history event");

        for listener in targets {
            listener(event);
        }
    }
}
