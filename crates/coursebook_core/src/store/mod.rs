//! In-memory collection stores.
//!
//! # Responsibility
//! - Own record collections for the lifetime of a session.
//! - Publish snapshots to subscribers (re-render triggers, persistence hooks).
//!
//! # Invariants
//! - Stores are only mutated through their own operations.
//! - Notification happens synchronously inside the mutating call.

pub mod cart;
pub mod keyed_store;
pub mod observer;
