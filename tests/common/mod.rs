#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use rusty_golf_tracker::clock::{Clock, FixedClock};
use rusty_golf_tracker::model::HistoricalRound;
use rusty_golf_tracker::storage::{KeyValueStore, MemoryKv, StorageError};

/// Wednesday, mid-afternoon UTC.
pub fn wednesday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 10, 15, 0, 0).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(FixedClock(now))
}

pub fn round_on(date: DateTime<Utc>, total: i32) -> HistoricalRound {
    HistoricalRound::new(date, total)
}

pub fn days_ago(now: DateTime<Utc>, days: i64, total: i32) -> HistoricalRound {
    round_on(now - Duration::days(days), total)
}

pub fn nine_hole_round(date: DateTime<Utc>, holes: &[i32]) -> HistoricalRound {
    let mut round = round_on(date, holes.iter().sum());
    round.is_nine_hole = true;
    round.hole_scores = Some(holes.to_vec());
    round
}

/// Ten rounds a day apart ending yesterday: five older at `older`, then five at `recent`.
pub fn ten_rounds(now: DateTime<Utc>, older: i32, recent: i32) -> Vec<HistoricalRound> {
    (0..10)
        .map(|i| {
            let total = if i < 5 { older } else { recent };
            days_ago(now, 10 - i, total)
        })
        .collect()
}

/// Store that refuses every call, standing in for an unavailable shared suite.
pub struct BrokenKv;

impl KeyValueStore for BrokenKv {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::new("suite unavailable"))
    }

    fn put_all(&self, _entries: &[(&str, String)]) -> Result<(), StorageError> {
        Err(StorageError::new("suite unavailable"))
    }
}

/// Memory store that remembers which keys each batch wrote.
#[derive(Default)]
pub struct RecordingKv {
    pub inner: MemoryKv,
    pub batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingKv {
    pub fn last_batch(&self) -> Vec<String> {
        self.batches.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl KeyValueStore for RecordingKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn put_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        self.batches
            .lock()
            .unwrap()
            .push(entries.iter().map(|(k, _)| (*k).to_string()).collect());
        self.inner.put_all(entries)
    }
}
