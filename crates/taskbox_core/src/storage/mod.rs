//! Key-value storage contracts and JSON collection codec.
//!
//! # Responsibility
//! - Define the device-storage seam the stores persist through.
//! - Encode/decode whole collections as JSON blobs under fixed keys.
//!
//! # Invariants
//! - A key holds either nothing or one complete JSON document.
//! - Decode failures name the key they came from and never panic.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteKeyValueStorage;

/// Storage key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "tasks";
/// Storage key holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "folders";

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from storage reads, writes and JSON codec steps.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backend refused the operation.
    Unavailable(String),
    /// Collection could not be encoded before writing.
    Encode {
        key: String,
        source: serde_json::Error,
    },
    /// Stored value under `key` is not a valid document.
    Corrupted {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key-value storage requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
            Self::Corrupted { key, source } => {
                write!(f, "corrupted value under `{key}`: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } | Self::Corrupted { source, .. } => Some(source),
            Self::UninitializedConnection { .. } | Self::Unavailable(_) => None,
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

/// String key-value storage, shaped after mobile async storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Reads and decodes the JSON document under `key`.
///
/// Returns `Ok(None)` when nothing was stored yet.
pub fn read_json<T, S>(storage: &S, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupted {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T, S>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::{read_json, write_json, MemoryStorage, StorageError, TASKS_KEY};

    #[test]
    fn read_json_returns_none_for_missing_key() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<String>> = read_json(&storage, TASKS_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_json_reports_corrupted_key() {
        let storage = MemoryStorage::new();
        storage.insert_raw(TASKS_KEY, "{not json");

        let err = read_json::<Vec<String>, _>(&storage, TASKS_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { ref key, .. } if key == TASKS_KEY));
    }

    #[test]
    fn write_then_read_json() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &[1, 2, 3]).unwrap();
        let value: Option<Vec<i32>> = read_json(&storage, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }
}
