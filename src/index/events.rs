//! Change notifications.
//!
//! The index emits three notifications: a definition was added, static
//! analysis finished, full resolution finished. Dispatch is synchronous and
//! in registration order, fired within the mutating call after its critical
//! section ends, so listeners always observe fully-updated state.
//!
//! Listeners must not mutate the index (or its subscriptions) from within a
//! callback; the resulting ordering is undefined and unsupported. With no
//! listeners registered, emission costs nothing beyond an empty-list check.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// A notification emitted by [`Index`](super::Index).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexEvent {
    /// A definition was inserted or overwritten.
    DefinitionAdded {
        /// The fully-qualified name that was set.
        fqn: Arc<str>,
    },
    /// Static analysis finished populating the index.
    StaticComplete,
    /// Cross-file resolution finished; the index is final.
    Complete,
}

impl IndexEvent {
    /// The kind tag of this event, for subscription matching.
    pub fn kind(&self) -> EventKind {
        match self {
            IndexEvent::DefinitionAdded { .. } => EventKind::DefinitionAdded,
            IndexEvent::StaticComplete => EventKind::StaticComplete,
            IndexEvent::Complete => EventKind::Complete,
        }
    }
}

/// The kinds of notification a listener can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    DefinitionAdded,
    StaticComplete,
    Complete,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&IndexEvent) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

/// Registered listeners, dispatched in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: RwLock<Vec<ListenerEntry>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(
        &self,
        kind: EventKind,
        listener: impl Fn(&IndexEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.write().push(ListenerEntry {
            id,
            kind,
            listener: Arc::new(listener),
        });
        SubscriptionId(id)
    }

    /// Returns whether a listener with that id was registered.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != id.0);
        entries.len() != before
    }

    pub(crate) fn emit(&self, event: &IndexEvent) {
        let kind = event.kind();
        // Snapshot matching listeners so user callbacks never run under the
        // registry lock.
        let matching: Vec<Listener> = {
            let entries = self.entries.read();
            if entries.is_empty() {
                return;
            }
            entries
                .iter()
                .filter(|entry| entry.kind == kind)
                .map(|entry| entry.listener.clone())
                .collect()
        };
        for listener in matching {
            listener(event);
        }
    }
}
