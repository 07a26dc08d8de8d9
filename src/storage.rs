pub mod helpers;
pub mod memory;
pub mod sqlite;

use crate::model::HistoricalRound;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;

pub use memory::{MemoryKv, MemoryRoundStore};
pub use sqlite::{SqliteKv, SqliteRoundStore};

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// String-keyed store shared by every execution context on the device.
///
/// Values are opaque text payloads (JSON in practice, see [`KeyValueStoreExt`]).
/// `put_all` writes its entries as one batch; implementations make that batch
/// visible to other readers all at once or not at all.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;
}

/// Typed JSON access on top of any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    fn get_json<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned,
    {
        match self.get(key)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Like [`get_json`](Self::get_json) but never fails: a missing key or a
    /// failed read yields `default()`, and the failure is logged.
    fn get_json_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.get_json::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                warn!("store read of {key} failed, using default: {e}");
                default()
            }
        }
    }

    fn put_json<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(value)?;
        self.put_all(&[(key, payload)])
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStoreExt for K {}

/// Durable history of completed rounds, addressed by the id the store assigns.
pub trait RoundStore: Send + Sync {
    /// Inserts a new round and returns its id. Any id already on `round` is ignored.
    fn insert_round(&self, round: &HistoricalRound) -> Result<i64, StorageError>;
    /// Replaces the round carrying `round.id`.
    fn update_round(&self, round: &HistoricalRound) -> Result<(), StorageError>;
    /// Returns `false` when no round had that id.
    fn delete_round(&self, id: i64) -> Result<bool, StorageError>;
    /// All rounds, newest first.
    fn rounds_by_date_desc(&self) -> Result<Vec<HistoricalRound>, StorageError>;
}
