//! In-memory keyed collection with snapshot notifications.
//!
//! # Responsibility
//! - Hold one ordered collection of keyed records.
//! - Provide add/update/remove/find/list primitives.
//! - Publish the new snapshot to observers after every change.
//!
//! # Invariants
//! - Insertion order is preserved; `update` replaces in place.
//! - Observers see the post-mutation snapshot before the mutating call returns.
//! - Calls that leave the snapshot unchanged do not notify.
//! - `add` does not reject duplicate ids; callers supply fresh ids.

use crate::model::record::{Keyed, RecordId};
use crate::store::observer::{ObserverList, SnapshotObserver, SubscriptionId};
use log::{debug, warn};
use std::collections::HashSet;

/// Ordered, observer-notified collection of keyed records.
pub struct KeyedCollectionStore<T> {
    name: &'static str,
    records: Vec<T>,
    observers: ObserverList<T>,
}

impl<T: Keyed> KeyedCollectionStore<T> {
    /// Creates an empty store. `name` only labels diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Vec::new(),
            observers: ObserverList::default(),
        }
    }

    /// Creates a store from an initial snapshot (e.g. rehydrated state).
    ///
    /// Records repeating an earlier id are dropped so the collection starts
    /// with unique keys.
    pub fn with_records(name: &'static str, records: Vec<T>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let total = records.len();
        let records: Vec<T> = records
            .into_iter()
            .filter(|record| seen.insert(record.id()))
            .collect();
        if records.len() != total {
            warn!(
                "event=store_seed module=store status=dedup store={} dropped={}",
                name,
                total - records.len()
            );
        }

        Self {
            name,
            records,
            observers: ObserverList::default(),
        }
    }

    /// Appends `record` to the end of the collection and notifies.
    ///
    /// # Contract
    /// - Callers must supply an id not already present. A duplicate is logged
    ///   but still appended; lookups then resolve to the earlier record.
    pub fn add(&mut self, record: T) {
        let id = record.id();
        if self.contains(id) {
            warn!(
                "event=store_add module=store status=duplicate_id store={} id={}",
                self.name, id
            );
        }
        self.records.push(record);
        self.publish("add", id);
    }

    /// Removes every record with `id`.
    ///
    /// Returns `false` (and does not notify) when nothing matched.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            debug!(
                "event=store_remove module=store status=absent store={} id={}",
                self.name, id
            );
            return false;
        }
        self.publish("remove", id);
        true
    }

    /// Replaces the record(s) sharing `record.id()`, keeping their position.
    ///
    /// Returns `false` (and does not notify) when no record matched.
    pub fn update(&mut self, record: T) -> bool
    where
        T: Clone,
    {
        let id = record.id();
        let mut matched = false;
        for slot in self.records.iter_mut().filter(|slot| slot.id() == id) {
            *slot = record.clone();
            matched = true;
        }
        if !matched {
            debug!(
                "event=store_update module=store status=absent store={} id={}",
                self.name, id
            );
            return false;
        }
        self.publish("update", id);
        true
    }

    /// Returns the first record with `id`.
    pub fn find(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.find(id).is_some()
    }

    /// Current snapshot in insertion order.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest id held, or `None` for an empty collection.
    pub fn max_id(&self) -> Option<RecordId> {
        self.records.iter().map(Keyed::id).max()
    }

    /// Smallest positive id not held by any record.
    ///
    /// Fallback for callers whose id generator ran out above `max_id()`.
    pub fn lowest_free_id(&self) -> RecordId {
        let taken: HashSet<RecordId> = self.records.iter().map(Keyed::id).collect();
        (1..=RecordId::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(RecordId::MIN)
    }

    /// Registers a closure called with every new snapshot.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[T]) + 'static,
    {
        self.observers.register(Box::new(observer))
    }

    /// Registers an observer object (e.g. a persistence hook).
    pub fn attach<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: SnapshotObserver<T> + 'static,
    {
        self.observers.register(Box::new(observer))
    }

    /// Drops a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Mutable access to the record with `id` for in-place edits.
    ///
    /// The caller must follow up with `notify_changed` once done.
    pub(crate) fn find_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    pub(crate) fn notify_changed(&mut self, op: &'static str, id: RecordId) {
        self.publish(op, id);
    }

    fn publish(&mut self, op: &'static str, id: RecordId) {
        debug!(
            "event=store_mutation module=store status=ok store={} op={} id={} size={} observers={}",
            self.name,
            op,
            id,
            self.records.len(),
            self.observers.len()
        );
        self.observers.notify(&self.records);
    }
}

#[cfg(test)]
mod tests {
    use super::KeyedCollectionStore;
    use crate::model::record::{Keyed, RecordId};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        label: &'static str,
    }

    impl Keyed for Item {
        fn id(&self) -> RecordId {
            self.id
        }
    }

    #[test]
    fn with_records_keeps_first_of_duplicate_ids() {
        let store = KeyedCollectionStore::with_records(
            "items",
            vec![
                Item { id: 1, label: "a" },
                Item { id: 2, label: "b" },
                Item { id: 1, label: "c" },
            ],
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(1).map(|item| item.label), Some("a"));
    }

    #[test]
    fn duplicate_add_is_kept_and_find_returns_first() {
        let mut store = KeyedCollectionStore::new("items");
        store.add(Item { id: 7, label: "first" });
        store.add(Item { id: 7, label: "second" });
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(7).map(|item| item.label), Some("first"));

        assert!(store.remove(7));
        assert!(store.is_empty());
    }

    #[test]
    fn lowest_free_id_fills_first_gap() {
        let mut store = KeyedCollectionStore::new("items");
        assert_eq!(store.lowest_free_id(), 1);
        store.add(Item { id: 1, label: "a" });
        store.add(Item { id: 3, label: "c" });
        store.add(Item { id: i64::MAX, label: "max" });
        assert_eq!(store.lowest_free_id(), 2);
        store.add(Item { id: 2, label: "b" });
        assert_eq!(store.lowest_free_id(), 4);
    }

    #[test]
    fn max_id_tracks_largest_key() {
        let mut store = KeyedCollectionStore::new("items");
        assert_eq!(store.max_id(), None);
        store.add(Item { id: 5, label: "x" });
        store.add(Item { id: 3, label: "y" });
        assert_eq!(store.max_id(), Some(5));
    }
}
