//! Cart line item: a keyed record plus a quantity counter.
//!
//! # Invariants
//! - `quantity >= 1` for every line held by a cart.
//! - The wrapped item keeps the fields it had on first insertion.

use crate::model::record::{Keyed, Priced, RecordId};
use serde::{Deserialize, Serialize};

/// One cart entry. Serialized flat: the item's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine<T> {
    #[serde(flatten)]
    pub item: T,
    pub quantity: u32,
}

impl<T> CartLine<T> {
    /// Wraps a first-time cart item.
    pub fn first(item: T) -> Self {
        Self { item, quantity: 1 }
    }
}

impl<T: Priced> CartLine<T> {
    /// `price * quantity` for this line.
    pub fn subtotal(&self) -> f64 {
        self.item.price() * f64::from(self.quantity)
    }
}

impl<T: Keyed> Keyed for CartLine<T> {
    fn id(&self) -> RecordId {
        self.item.id()
    }
}
