use log::{debug, info, warn};
use std::sync::{Arc, Mutex, PoisonError};

use super::{ActiveRound, FinishedRound, load_active_round, save_active_round};
use crate::clock::{Clock, SystemClock};
use crate::storage::KeyValueStore;

/// Owner of the active round in the main app.
///
/// Every operation reloads the card from the shared store, applies its change
/// to that fresh copy and writes the whole card back before returning. The
/// mutex only serialises callers inside this process.
pub struct ActiveRoundStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    mirror: Mutex<ActiveRound>,
}

impl ActiveRoundStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mirror = load_active_round(kv.as_ref(), clock.now());
        Self {
            kv,
            clock,
            mirror: Mutex::new(mirror),
        }
    }

    pub fn with_system_clock(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::new(kv, Arc::new(SystemClock))
    }

    /// Last state this process saw, without touching the store. May be stale.
    pub fn cached(&self) -> ActiveRound {
        self.mirror
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reloads from the store and returns the current card.
    pub fn refresh(&self) -> ActiveRound {
        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        *mirror = load_active_round(self.kv.as_ref(), self.clock.now());
        mirror.clone()
    }

    pub fn has_active_round(&self) -> bool {
        self.refresh().has_active_round()
    }

    pub fn is_complete(&self) -> bool {
        self.refresh().is_complete()
    }

    pub fn total_score(&self) -> i32 {
        self.refresh().total_score()
    }

    /// Begins a new card on hole 1, replacing whatever was in progress.
    pub fn start_round(&self, course_name: &str, is_nine_hole: bool) {
        let now = self.clock.now();
        self.mutate(|round| {
            *round = ActiveRound::started(course_name, is_nine_hole, now);
        });
        info!("started round at '{course_name}' (nine_hole={is_nine_hole})");
    }

    /// Records `score` on the current hole. Invalid scores are dropped silently.
    pub fn record_score(&self, score: i32) -> bool {
        let recorded = self.mutate(|round| round.record_score(score));
        if !recorded {
            debug!("ignored score {score}: out of range or no hole in play");
        }
        recorded
    }

    /// Hands over a completed card and clears it. Incomplete cards stay as they are.
    pub fn finish_round(&self) -> Option<FinishedRound> {
        let now = self.clock.now();
        let finished = self.mutate(|round| {
            let finished = round.finished();
            if finished.is_some() {
                *round = ActiveRound::empty(now);
            }
            finished
        });
        if let Some(done) = &finished {
            info!(
                "finished round at '{}' with total {}",
                done.course_name, done.total_score
            );
        }
        finished
    }

    /// Discards the card, complete or not.
    pub fn clear(&self) {
        let now = self.clock.now();
        self.mutate(|round| *round = ActiveRound::empty(now));
        info!("cleared active round");
    }

    fn mutate<R>(&self, change: impl FnOnce(&mut ActiveRound) -> R) -> R {
        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        *mirror = load_active_round(self.kv.as_ref(), self.clock.now());
        let before = mirror.clone();
        let result = change(&mut mirror);
        if *mirror != before {
            match save_active_round(self.kv.as_ref(), &mirror) {
                Ok(()) => debug!(
                    "persisted active round: hole {} with {} scores",
                    mirror.current_hole,
                    mirror.hole_scores.len()
                ),
                Err(e) => warn!("failed to persist active round: {e}"),
            }
        }
        result
    }
}
