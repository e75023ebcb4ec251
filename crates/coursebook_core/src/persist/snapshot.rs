//! Snapshot encoding, rehydration, and the write-on-change hook.
//!
//! # Responsibility
//! - Serialize a full collection snapshot as a JSON array under a fixed key.
//! - Rehydrate the initial collection once at start-up.
//!
//! # Invariants
//! - Rehydration never fails: absent, unreadable, or malformed blobs yield
//!   an empty collection.
//! - Hook write failures are logged, never propagated to the mutating caller.
//! - Log events carry sizes and keys only, never record payload.

use crate::persist::blob_store::{BlobError, BlobStore};
use crate::store::observer::SnapshotObserver;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::rc::Rc;

/// Storage key for the student roster.
pub const STUDENTS_KEY: &str = "students";
/// Storage key for the book catalog.
pub const BOOKS_KEY: &str = "books";
/// Storage key for cart lines.
pub const CART_KEY: &str = "cart";

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum SnapshotError {
    Blob(BlobError),
    Serde(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob(err) => write!(f, "{err}"),
            Self::Serde(err) => write!(f, "snapshot encoding error: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Blob(err) => Some(err),
            Self::Serde(err) => Some(err),
        }
    }
}

impl From<BlobError> for SnapshotError {
    fn from(value: BlobError) -> Self {
        Self::Blob(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Serializes `records` and writes them under `key`.
pub fn save_snapshot<T: Serialize>(
    store: &dyn BlobStore,
    key: &str,
    records: &[T],
) -> Result<usize, SnapshotError> {
    let encoded = serde_json::to_string(records)?;
    store.write(key, &encoded)?;
    Ok(encoded.len())
}

/// Reads the raw snapshot under `key`.
///
/// Returns `Ok(None)` when nothing has been stored yet. Unlike
/// `load_snapshot`, failures are reported to the caller.
pub fn try_load_snapshot<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Option<Vec<T>>, SnapshotError> {
    let Some(raw) = store.read(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Rehydrates the collection stored under `key`, falling back to empty.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Vec<T> {
    load_snapshot_or(store, key, Vec::new)
}

/// Like `load_snapshot`, but seeds with `when_absent()` if nothing was ever
/// stored under `key`. Unreadable or malformed blobs still yield empty.
pub fn load_snapshot_or<T, F>(store: &dyn BlobStore, key: &str, when_absent: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match try_load_snapshot(store, key) {
        Ok(Some(records)) => {
            debug!(
                "event=snapshot_load module=persist status=ok key={} records={}",
                key,
                records.len()
            );
            records
        }
        Ok(None) => {
            let records = when_absent();
            debug!(
                "event=snapshot_load module=persist status=absent key={} seeded={}",
                key,
                records.len()
            );
            records
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=persist status=fallback_empty key={} error={}",
                key, err
            );
            Vec::new()
        }
    }
}

/// Observer that persists every new snapshot under a fixed key.
pub struct PersistenceHook<T> {
    store: Rc<dyn BlobStore>,
    key: &'static str,
    _records: PhantomData<fn(&[T])>,
}

impl<T> PersistenceHook<T> {
    pub fn new(store: Rc<dyn BlobStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _records: PhantomData,
        }
    }
}

impl<T: Serialize> SnapshotObserver<T> for PersistenceHook<T> {
    fn on_snapshot(&mut self, snapshot: &[T]) {
        match save_snapshot(self.store.as_ref(), self.key, snapshot) {
            Ok(bytes) => debug!(
                "event=snapshot_write module=persist status=ok key={} records={} bytes={}",
                self.key,
                snapshot.len(),
                bytes
            ),
            Err(err) => warn!(
                "event=snapshot_write module=persist status=error key={} records={} error={}",
                self.key,
                snapshot.len(),
                err
            ),
        }
    }
}
