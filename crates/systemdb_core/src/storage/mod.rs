//! Durable key-value storage backends.
//!
//! # Responsibility
//! - Abstract the single-slot durable mirror behind a small trait so the
//!   store can be exercised against memory in tests and SQLite in the app.
//!
//! # Invariants
//! - Values are opaque strings; encoding/decoding is the caller's concern.
//! - `set` replaces the whole value for a key, never merges.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend read/write failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value storage contract for the durable catalog mirror.
pub trait StorageBackend {
    /// Reads the full value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the full value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Deletes the entry for `key`. Absent keys are not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
