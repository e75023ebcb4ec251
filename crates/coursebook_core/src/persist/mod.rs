//! Snapshot persistence over injected key-value blob storage.
//!
//! # Responsibility
//! - Define the blob storage seam (`BlobStore`) and its implementations.
//! - Snapshot collections to JSON on change and rehydrate them at start-up.
//!
//! # Invariants
//! - One fixed key per collection type.
//! - Persistence problems never surface to store callers.

pub mod blob_store;
pub mod snapshot;
