//! Subscriber registry and unsubscribe handles.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// A zero-argument change callback.
pub(crate) type Listener = Arc<dyn Fn() + Send + Sync>;

/// Listeners in registration order, keyed by a monotonically increasing id.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl ListenerRegistry {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push((id, listener));
        id
    }

    /// Returns `true` if a listener was removed.
    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Clone the current listeners so they can run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it. Removal is idempotent,
/// and a handle that outlives its store is inert.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<Mutex<ListenerRegistry>>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove this listener from the store.
    ///
    /// Takes effect from the next dispatch on. Calling it again does nothing.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if registry.lock().remove(self.id) {
            tracing::trace!(id = self.id, "Listener unsubscribed");
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.lock().contains(self.id))
    }
}
