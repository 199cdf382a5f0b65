//! Change notification for registries.

use std::sync::{Arc, Weak};

use super::{lock, Shared};

/// The kind of change a [`ChangeEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Remove,
    Clear,
}

/// A change to a registry's style store, delivered synchronously to every
/// listener registered with [`Registry::on_change`](crate::Registry::on_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Style text was registered under `id`.
    Added { id: String, text: String },
    /// The entry for `id` was removed.
    Removed { id: String, text: String },
    /// The store was emptied. One event covers every removed entry.
    Cleared { ids: Vec<String> },
}

impl ChangeEvent {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::Added { .. } => ChangeKind::Add,
            ChangeEvent::Removed { .. } => ChangeKind::Remove,
            ChangeEvent::Cleared { .. } => ChangeKind::Clear,
        }
    }

    /// The affected id, for add and remove events.
    pub fn id(&self) -> Option<&str> {
        match self {
            ChangeEvent::Added { id, .. } | ChangeEvent::Removed { id, .. } => Some(id.as_str()),
            ChangeEvent::Cleared { .. } => None,
        }
    }

    /// The affected style text, for add and remove events.
    pub fn text(&self) -> Option<&str> {
        match self {
            ChangeEvent::Added { text, .. } | ChangeEvent::Removed { text, .. } => {
                Some(text.as_str())
            }
            ChangeEvent::Cleared { .. } => None,
        }
    }
}

pub(crate) type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Listeners in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> u64 {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Copies the current listener set so it can be invoked without holding
    /// the registry lock.
    pub(crate) fn snapshot(&self) -> Vec<(u64, Listener)> {
        self.entries
            .iter()
            .map(|(id, l)| (*id, Arc::clone(l)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle for removing a listener added with
/// [`Registry::on_change`](crate::Registry::on_change).
///
/// Dropping a subscription leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(shared: Weak<Shared>, id: u64) -> Self {
        Self { shared, id }
    }

    /// Removes exactly this listener. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.shared.upgrade() {
            lock(&shared.listeners).remove(self.id);
        }
    }

    /// Returns true while the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .map(|shared| lock(&shared.listeners).contains(self.id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let added = ChangeEvent::Added {
            id: "box".into(),
            text: "#box{}".into(),
        };
        assert_eq!(added.kind(), ChangeKind::Add);
        assert_eq!(added.id(), Some("box"));
        assert_eq!(added.text(), Some("#box{}"));

        let cleared = ChangeEvent::Cleared {
            ids: vec!["box".into()],
        };
        assert_eq!(cleared.kind(), ChangeKind::Clear);
        assert_eq!(cleared.id(), None);
        assert_eq!(cleared.text(), None);
    }

    #[test]
    fn test_listeners_add_remove() {
        let mut listeners = Listeners::default();
        let a = listeners.add(Arc::new(|_: &ChangeEvent| {}));
        let b = listeners.add(Arc::new(|_: &ChangeEvent| {}));

        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);
        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        assert!(!listeners.contains(a));
        assert!(listeners.contains(b));
        let snapshot = listeners.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, b);
    }
}
