//! Merge-by-key cart built on `KeyedCollectionStore`.
//!
//! # Responsibility
//! - Merge repeated insertions of one item into a single quantity-counted line.
//! - Derive the cart total on demand.
//!
//! # Invariants
//! - Every line has `quantity >= 1`; there is no decrement path.
//! - Incrementing keeps the fields captured on first insertion.

use crate::model::cart_line::CartLine;
use crate::model::record::{Keyed, Priced, RecordId};
use crate::store::keyed_store::KeyedCollectionStore;
use crate::store::observer::{SnapshotObserver, SubscriptionId};

/// Shopping cart over keyed, priced items.
pub struct CartAggregator<T> {
    lines: KeyedCollectionStore<CartLine<T>>,
}

impl<T: Keyed + Priced> CartAggregator<T> {
    pub fn new() -> Self {
        Self {
            lines: KeyedCollectionStore::new("cart"),
        }
    }

    /// Rebuilds a cart from persisted lines.
    pub fn with_lines(lines: Vec<CartLine<T>>) -> Self {
        let lines = lines.into_iter().filter(|line| line.quantity >= 1).collect();
        Self {
            lines: KeyedCollectionStore::with_records("cart", lines),
        }
    }

    /// Adds `item`, or bumps the quantity of its existing line.
    ///
    /// Returns the line quantity after the call.
    pub fn add_or_increment(&mut self, item: T) -> u32 {
        let id = item.id();
        if let Some(line) = self.lines.find_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
            let quantity = line.quantity;
            self.lines.notify_changed("increment", id);
            return quantity;
        }

        self.lines.add(CartLine::first(item));
        1
    }

    /// Sum of `price * quantity` over all lines; `0.0` when empty.
    pub fn total(&self) -> f64 {
        self.lines.list().iter().map(CartLine::subtotal).sum()
    }

    pub fn list(&self) -> &[CartLine<T>] {
        self.lines.list()
    }

    pub fn find(&self, id: RecordId) -> Option<&CartLine<T>> {
        self.lines.find(id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[CartLine<T>]) + 'static,
    {
        self.lines.subscribe(observer)
    }

    pub fn attach<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: SnapshotObserver<CartLine<T>> + 'static,
    {
        self.lines.attach(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.lines.unsubscribe(id)
    }
}

impl<T: Keyed + Priced> Default for CartAggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}
