//! Snapshot subscription contracts.
//!
//! # Responsibility
//! - Define the observer seam stores publish new snapshots through.
//! - Keep registration order as notification order.
//!
//! # Invariants
//! - Observers run synchronously, in the order they were registered.
//! - Subscription ids are never reused within one observer list.

/// Receives the full collection snapshot after every change.
pub trait SnapshotObserver<T> {
    fn on_snapshot(&mut self, snapshot: &[T]);
}

impl<T, F> SnapshotObserver<T> for F
where
    F: FnMut(&[T]),
{
    fn on_snapshot(&mut self, snapshot: &[T]) {
        self(snapshot)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Ordered observer registry owned by one store.
pub(crate) struct ObserverList<T> {
    entries: Vec<(SubscriptionId, Box<dyn SnapshotObserver<T>>)>,
    next_id: u64,
}

impl<T> Default for ObserverList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> ObserverList<T> {
    pub(crate) fn register(&mut self, observer: Box<dyn SnapshotObserver<T>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, snapshot: &[T]) {
        for (_, observer) in &mut self.entries {
            observer.on_snapshot(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObserverList;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order_and_skips_removed() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ObserverList::<i32>::default();

        let first_calls = Rc::clone(&calls);
        let first = observers.register(Box::new(move |snapshot: &[i32]| {
            first_calls.borrow_mut().push(("first", snapshot.len()));
        }));
        let second_calls = Rc::clone(&calls);
        observers.register(Box::new(move |snapshot: &[i32]| {
            second_calls.borrow_mut().push(("second", snapshot.len()));
        }));

        observers.notify(&[1, 2]);
        assert!(observers.remove(first));
        assert!(!observers.remove(first));
        observers.notify(&[1]);

        assert_eq!(
            *calls.borrow(),
            vec![("first", 2), ("second", 2), ("second", 1)]
        );
        assert_eq!(observers.len(), 1);
    }
}
