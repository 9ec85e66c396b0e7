//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Only connections opened through `db::open_db*` (fully migrated) are
//!   accepted.
//! - `set_item` is an upsert; the last write for a key wins.

use super::{KeyValueStorage, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value storage over the `kv_store` table.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match the
    ///   latest migration.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
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

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
