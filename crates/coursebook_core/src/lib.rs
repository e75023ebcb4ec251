//! Core collection stores for the coursebook roster and bookstore apps.
//! Presentation layers drive these stores; this crate owns their invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{default_catalog, Book, BookDraft};
pub use model::cart_line::CartLine;
pub use model::form::FormError;
pub use model::record::{Keyed, Priced, RecordId, RecordIdGenerator};
pub use model::student::{Student, StudentDraft};
pub use persist::blob_store::{BlobError, BlobResult, BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use persist::snapshot::{
    load_snapshot, load_snapshot_or, save_snapshot, try_load_snapshot, PersistenceHook,
    SnapshotError, BOOKS_KEY, CART_KEY, STUDENTS_KEY,
};
pub use service::bookstore_service::{BookstoreError, BookstoreService};
pub use service::roster_service::RosterService;
pub use store::cart::CartAggregator;
pub use store::keyed_store::KeyedCollectionStore;
pub use store::observer::{SnapshotObserver, SubscriptionId};

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
