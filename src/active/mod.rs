//! The in-progress round, shared between the main app and the widget.
//!
//! Both contexts talk to the same [`KeyValueStore`] under the keys in [`keys`].
//! Neither trusts its in-memory copy: every read and every mutation starts by
//! loading the current entries from the store.
//!
//! Two contexts writing at the same moment are not coordinated. Each write is a
//! read-modify-write of the whole card, so the last writer wins and a score
//! recorded by the other side in between can be lost.

pub mod round;
pub mod store;
pub mod widget;

pub use round::*;
pub use store::*;
pub use widget::*;

use chrono::{DateTime, Utc};

use crate::storage::{KeyValueStore, KeyValueStoreExt, StorageError};

/// Keys for the active round. Every reader and writer must use these.
pub mod keys {
    pub const COURSE_NAME: &str = "rusty_golf.active_round.course_name";
    pub const IS_NINE_HOLE: &str = "rusty_golf.active_round.is_nine_hole";
    pub const CURRENT_HOLE: &str = "rusty_golf.active_round.current_hole";
    pub const HOLE_SCORES: &str = "rusty_golf.active_round.hole_scores";
    pub const DATE: &str = "rusty_golf.active_round.date";
}

/// Loads the card from the store. Missing entries read as an empty card.
#[must_use]
pub fn load_active_round(kv: &dyn KeyValueStore, now: DateTime<Utc>) -> ActiveRound {
    ActiveRound {
        course_name: kv.get_json_or(keys::COURSE_NAME, String::new),
        is_nine_hole: kv.get_json_or(keys::IS_NINE_HOLE, || false),
        current_hole: kv.get_json_or(keys::CURRENT_HOLE, || 0),
        hole_scores: kv.get_json_or(keys::HOLE_SCORES, Vec::new),
        date: kv.get_json_or(keys::DATE, || now),
    }
}

/// Writes every field of the card in one batch.
///
/// # Errors
/// Returns an error if a field cannot be encoded or the store rejects the batch.
pub fn save_active_round(kv: &dyn KeyValueStore, round: &ActiveRound) -> Result<(), StorageError> {
    kv.put_all(&[
        (keys::COURSE_NAME, serde_json::to_string(&round.course_name)?),
        (keys::IS_NINE_HOLE, serde_json::to_string(&round.is_nine_hole)?),
        (keys::CURRENT_HOLE, serde_json::to_string(&round.current_hole)?),
        (keys::HOLE_SCORES, serde_json::to_string(&round.hole_scores)?),
        (keys::DATE, serde_json::to_string(&round.date)?),
    ])
}

/// Writes only the fields a score touches, leaving course and date alone.
///
/// # Errors
/// Returns an error if a field cannot be encoded or the store rejects the batch.
pub fn save_scorecard(kv: &dyn KeyValueStore, round: &ActiveRound) -> Result<(), StorageError> {
    kv.put_all(&[
        (keys::HOLE_SCORES, serde_json::to_string(&round.hole_scores)?),
        (keys::CURRENT_HOLE, serde_json::to_string(&round.current_hole)?),
    ])
}
