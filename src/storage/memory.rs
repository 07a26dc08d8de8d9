use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{KeyValueStore, RoundStore, StorageError};
use crate::model::HistoricalRound;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::new(format!("memory store lock poisoned: {e}")))
}

/// In-process key-value store. Clones share the same map, so handing one clone
/// to each context behaves like two processes opening the same suite.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn put_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries)?;
        for (key, payload) in entries {
            map.insert((*key).to_string(), payload.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RoundTable {
    next_id: i64,
    rows: Vec<HistoricalRound>,
}

/// Round history kept in memory; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryRoundStore {
    table: Mutex<RoundTable>,
}

impl MemoryRoundStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoundStore for MemoryRoundStore {
    fn insert_round(&self, round: &HistoricalRound) -> Result<i64, StorageError> {
        let mut table = lock(&self.table)?;
        table.next_id += 1;
        let id = table.next_id;
        let mut row = round.clone();
        row.id = Some(id);
        table.rows.push(row);
        Ok(id)
    }

    fn update_round(&self, round: &HistoricalRound) -> Result<(), StorageError> {
        let id = round
            .id
            .ok_or_else(|| StorageError::new("cannot update a round without an id"))?;
        let mut table = lock(&self.table)?;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == Some(id))
            .ok_or_else(|| StorageError::new(format!("round {id} not found")))?;
        *row = round.clone();
        Ok(())
    }

    fn delete_round(&self, id: i64) -> Result<bool, StorageError> {
        let mut table = lock(&self.table)?;
        let before = table.rows.len();
        table.rows.retain(|row| row.id != Some(id));
        Ok(table.rows.len() != before)
    }

    fn rounds_by_date_desc(&self) -> Result<Vec<HistoricalRound>, StorageError> {
        let mut rows = lock(&self.table)?.rows.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }
}
