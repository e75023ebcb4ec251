//! Record identity shared by every keyed collection.
//!
//! # Responsibility
//! - Define the integer key type and the `Keyed`/`Priced` accessors the store
//!   layer relies on.
//! - Generate fresh creation-time ids for new records.
//!
//! # Invariants
//! - Ids handed out by one `RecordIdGenerator` are strictly increasing.
//! - A generator seeded with `starting_after(n)` never returns an id `<= n`.
//! - Once `RecordId::MAX` has been issued the generator is exhausted and
//!   callers must pick an unused id from their collection instead.

use std::time::{SystemTime, UNIX_EPOCH};

/// Integer key identifying a record within its owning collection.
pub type RecordId = i64;

/// Records that carry a stable collection key.
pub trait Keyed {
    fn id(&self) -> RecordId;
}

/// Records that carry a unit price, used by cart aggregation.
pub trait Priced {
    fn price(&self) -> f64;
}

/// Monotonic id source derived from wall-clock milliseconds.
///
/// Two creations within the same millisecond still get distinct ids: the
/// generator bumps past the last issued value instead of repeating it.
#[derive(Debug, Clone, Default)]
pub struct RecordIdGenerator {
    last_issued: RecordId,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that only issues ids greater than `floor`.
    ///
    /// Used after rehydration so new records never collide with persisted ones.
    pub fn starting_after(floor: RecordId) -> Self {
        Self { last_issued: floor }
    }

    /// Returns the next fresh id, or `None` once the id space above the
    /// last issued value is used up.
    pub fn next_id(&mut self) -> Option<RecordId> {
        let candidate = now_epoch_ms().max(self.last_issued.checked_add(1)?);
        self.last_issued = candidate;
        Some(candidate)
    }

    /// Returns the most recently issued id (or the seed floor).
    pub fn last_issued(&self) -> RecordId {
        self.last_issued
    }
}

fn now_epoch_ms() -> RecordId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| RecordId::try_from(elapsed.as_millis()).unwrap_or(RecordId::MAX))
        .unwrap_or(0)
}
