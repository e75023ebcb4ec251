//! Key-value string blob storage contracts and implementations.
//!
//! # Responsibility
//! - Define the `read`/`write` seam snapshot persistence writes through.
//! - Provide an in-memory store and a SQLite-file store.
//!
//! # Invariants
//! - Keys are non-blank; a blank key is rejected before touching storage.
//! - `write` fully replaces the previous value for its key.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type BlobResult<T> = Result<T, BlobError>;

/// Blob storage failure.
#[derive(Debug)]
pub enum BlobError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid blob key `{key}`"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String blob storage keyed by a fixed name per collection.
pub trait BlobStore {
    fn read(&self, key: &str) -> BlobResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> BlobResult<()>;
}

/// Process-local blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<BTreeMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.blobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        let key = normalize_key(key)?;
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        let key = normalize_key(key)?;
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store persisted in the `kv_blobs` table of a SQLite database.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Wraps a connection that already went through `open_db`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> BlobResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> BlobResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> BlobResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_blobs ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

fn normalize_key(key: &str) -> BlobResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}
