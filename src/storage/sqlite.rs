use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::helpers::{format_rfc3339, parse_rfc3339};
use super::{KeyValueStore, RoundStore, StorageError};
use crate::model::HistoricalRound;

const SHARED_KV_DDL: &str = "
CREATE TABLE IF NOT EXISTS shared_kv (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);";

const ROUND_DDL: &str = "
CREATE TABLE IF NOT EXISTS round (
    round_id INTEGER PRIMARY KEY AUTOINCREMENT,
    played_at TEXT NOT NULL,
    course_name TEXT NOT NULL DEFAULT '',
    total_score INTEGER NOT NULL,
    front_nine_score INTEGER,
    back_nine_score INTEGER,
    notes TEXT,
    is_nine_hole INTEGER NOT NULL DEFAULT 0,
    hole_scores TEXT
);
CREATE INDEX IF NOT EXISTS idx_round_played_at ON round (played_at);";

// Writers from another process hold the file lock only for a single batch.
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

fn open_connection(path: &Path, ddl: &str) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(ddl)?;
    Ok(conn)
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StorageError> {
    conn.lock()
        .map_err(|e| StorageError::new(format!("sqlite connection lock poisoned: {e}")))
}

/// Key-value store in a SQLite file. Every process that opens the same file
/// sees the same entries; each `put_all` batch is one transaction.
#[derive(Debug)]
pub struct SqliteKv {
    conn: Mutex<Connection>,
}

impl SqliteKv {
    /// Opens (creating if needed) the shared store at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = open_connection(path.as_ref(), SHARED_KV_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = lock(&self.conn)?;
        let value = conn
            .query_row(
                "SELECT value FROM shared_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut conn = lock(&self.conn)?;
        let updated_at = format_rfc3339(chrono::Utc::now());
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO shared_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?;
            for (key, payload) in entries {
                stmt.execute(params![key, payload, updated_at])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

struct RoundRow {
    round_id: i64,
    played_at: String,
    course_name: String,
    total_score: i32,
    front_nine_score: Option<i32>,
    back_nine_score: Option<i32>,
    notes: Option<String>,
    is_nine_hole: bool,
    hole_scores: Option<String>,
}

impl RoundRow {
    fn into_round(self) -> Result<HistoricalRound, StorageError> {
        let date = parse_rfc3339(&self.played_at).map_err(|e| {
            StorageError::new(format!(
                "round {} has an unreadable date '{}': {e}",
                self.round_id, self.played_at
            ))
        })?;
        let hole_scores = match self.hole_scores {
            Some(json) => Some(serde_json::from_str::<Vec<i32>>(&json)?),
            None => None,
        };
        Ok(HistoricalRound {
            id: Some(self.round_id),
            date,
            course_name: self.course_name,
            total_score: self.total_score,
            front_nine_score: self.front_nine_score,
            back_nine_score: self.back_nine_score,
            notes: self.notes,
            is_nine_hole: self.is_nine_hole,
            hole_scores,
        })
    }
}

fn hole_scores_json(round: &HistoricalRound) -> Result<Option<String>, StorageError> {
    match &round.hole_scores {
        Some(scores) => Ok(Some(serde_json::to_string(scores)?)),
        None => Ok(None),
    }
}

/// Round history in a SQLite file.
#[derive(Debug)]
pub struct SqliteRoundStore {
    conn: Mutex<Connection>,
}

impl SqliteRoundStore {
    /// Opens (creating if needed) the round database at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = open_connection(path.as_ref(), ROUND_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl RoundStore for SqliteRoundStore {
    fn insert_round(&self, round: &HistoricalRound) -> Result<i64, StorageError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO round (played_at, course_name, total_score, front_nine_score, back_nine_score, notes, is_nine_hole, hole_scores)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                format_rfc3339(round.date),
                round.course_name,
                round.total_score,
                round.front_nine_score,
                round.back_nine_score,
                round.notes,
                round.is_nine_hole,
                hole_scores_json(round)?,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_round(&self, round: &HistoricalRound) -> Result<(), StorageError> {
        let id = round
            .id
            .ok_or_else(|| StorageError::new("cannot update a round without an id"))?;
        let conn = lock(&self.conn)?;
        let changed = conn.execute(
            "UPDATE round SET played_at = ?2, course_name = ?3, total_score = ?4, front_nine_score = ?5,
                back_nine_score = ?6, notes = ?7, is_nine_hole = ?8, hole_scores = ?9
             WHERE round_id = ?1",
            params![
                id,
                format_rfc3339(round.date),
                round.course_name,
                round.total_score,
                round.front_nine_score,
                round.back_nine_score,
                round.notes,
                round.is_nine_hole,
                hole_scores_json(round)?,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::new(format!("round {id} not found")));
        }
        Ok(())
    }

    fn delete_round(&self, id: i64) -> Result<bool, StorageError> {
        let conn = lock(&self.conn)?;
        let changed = conn.execute("DELETE FROM round WHERE round_id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn rounds_by_date_desc(&self) -> Result<Vec<HistoricalRound>, StorageError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT round_id, played_at, course_name, total_score, front_nine_score, back_nine_score,
                    notes, is_nine_hole, hole_scores
             FROM round
             ORDER BY played_at DESC, round_id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RoundRow {
                round_id: row.get(0)?,
                played_at: row.get(1)?,
                course_name: row.get(2)?,
                total_score: row.get(3)?,
                front_nine_score: row.get(4)?,
                back_nine_score: row.get(5)?,
                notes: row.get(6)?,
                is_nine_hole: row.get(7)?,
                hole_scores: row.get(8)?,
            })
        })?;

        let mut rounds = Vec::new();
        for row in rows {
            rounds.push(row?.into_round()?);
        }
        Ok(rounds)
    }
}
