//! SQLite key-value backend.
//!
//! # Responsibility
//! - Persist storage slots in the `kv_store` table over a migrated
//!   connection.
//!
//! # Invariants
//! - Every `set` rewrites the whole row and refreshes `updated_at`.

use super::{StorageBackend, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed storage over a borrowed, migrated connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Constructs a backend from a connection opened via the `db` module.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StorageBackend for SqliteStorage<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
