//! Ordered registry of change listeners.
//!
//! Listeners are kept in registration order and identified by a monotonically
//! increasing id.  The store takes a [`SubscriberList::snapshot`] before each
//! dispatch, so a listener that unsubscribes itself (or another listener) from
//! inside its callback does not disturb the dispatch in progress; the change
//! takes effect from the next mutation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use campus_core::SettingsState;

/// Callback invoked with the full new state after every mutation.
pub type Listener = Box<dyn FnMut(&SettingsState)>;

pub(crate) type SharedListener = Rc<RefCell<Listener>>;

/// Listeners of one store, in registration order.
#[derive(Default)]
pub struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, SharedListener)>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` and returns its id.
    pub fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    /// Removes the listener with `id`.  Returns `false` if it was already gone.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cheap copy of the current listeners for dispatch.
    pub(crate) fn snapshot(&self) -> Vec<SharedListener> {
        self.entries.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

/// Handle returned by `SettingsStore::subscribe`.
///
/// Call [`Subscription::unsubscribe`] to stop receiving notifications.
/// Dropping the handle leaves the listener registered.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    list: Weak<RefCell<SubscriberList>>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(list: &Rc<RefCell<SubscriberList>>, id: u64) -> Self {
        Self {
            list: Rc::downgrade(list),
            id,
        }
    }

    /// Deregisters the listener.  Calling this more than once, or after the
    /// store is gone, is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(list) = self.list.upgrade() {
            list.borrow_mut().remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut list = SubscriberList::new();
        let a = list.insert(Box::new(|_| {}));
        let b = list.insert(Box::new(|_| {}));
        assert!(b > a);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut list = SubscriberList::new();
        let id = list.insert(Box::new(|_| {}));
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut list = SubscriberList::new();
        let first = list.insert(Box::new(|_| {}));
        list.remove(first);
        let second = list.insert(Box::new(|_| {}));
        assert_ne!(first, second);
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        // Arrange
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut list = SubscriberList::new();
        for tag in 0..3 {
            let order = Rc::clone(&order);
            list.insert(Box::new(move |_| order.borrow_mut().push(tag)));
        }

        // Act
        for listener in list.snapshot() {
            let mut callback = listener.borrow_mut();
            (*callback)(&SettingsState::default());
        }

        // Assert
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_after_list_dropped_is_noop() {
        let list = Rc::new(RefCell::new(SubscriberList::new()));
        let id = list.borrow_mut().insert(Box::new(|_| {}));
        let sub = Subscription::new(&list, id);
        drop(list);
        sub.unsubscribe();
    }
}
