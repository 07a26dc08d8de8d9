use log::{debug, warn};
use std::sync::Arc;

use super::{HOLE_SCORE_RANGE, keys, load_active_round, save_scorecard};
use crate::clock::{Clock, SystemClock};
use crate::model::hole_count;
use crate::storage::{KeyValueStore, KeyValueStoreExt};

/// What the widget shows: read straight from the shared store on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEntry {
    pub course_name: String,
    pub current_hole: usize,
    pub is_nine_hole: bool,
}

impl WidgetEntry {
    #[must_use]
    pub fn has_active_round(&self) -> bool {
        (1..=hole_count(self.is_nine_hole)).contains(&self.current_hole)
    }
}

/// The secondary surface. It keeps no state of its own between activations.
pub struct WidgetSurface {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl WidgetSurface {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    pub fn with_system_clock(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::new(kv, Arc::new(SystemClock))
    }

    pub fn load_entry(&self) -> WidgetEntry {
        let kv = self.kv.as_ref();
        WidgetEntry {
            course_name: kv.get_json_or(keys::COURSE_NAME, String::new),
            current_hole: kv.get_json_or(keys::CURRENT_HOLE, || 0),
            is_nine_hole: kv.get_json_or(keys::IS_NINE_HOLE, || false),
        }
    }

    /// Scores offered as buttons.
    pub fn score_triggers(&self) -> impl Iterator<Item = i32> {
        HOLE_SCORE_RANGE
    }

    /// Button handler: records `score` for the hole in play.
    ///
    /// Only the hole pointer and the score list are written back, so a course
    /// rename made by the app in the meantime survives.
    pub fn record_score(&self, score: i32) -> bool {
        let mut round = load_active_round(self.kv.as_ref(), self.clock.now());
        if !round.record_score(score) {
            debug!("widget ignored score {score} on hole {}", round.current_hole);
            return false;
        }
        if let Err(e) = save_scorecard(self.kv.as_ref(), &round) {
            warn!("widget failed to persist score: {e}");
        }
        true
    }
}
