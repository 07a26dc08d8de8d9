use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::storage::{KeyValueStore, KeyValueStoreExt, StorageError};

pub const WEEKLY_GOAL_RANGE: RangeInclusive<u32> = 1..=7;
pub const MONTHLY_GOAL_RANGE: RangeInclusive<u32> = 1..=30;
pub const DEFAULT_WEEKLY_GOAL: u32 = 1;
pub const DEFAULT_MONTHLY_GOAL: u32 = 4;

const WEEKLY_GOAL_KEY: &str = "rusty_golf.goals.weekly";
const MONTHLY_GOAL_KEY: &str = "rusty_golf.goals.monthly";

/// Round-count targets behind the play and consistency rings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goals {
    pub weekly: u32,
    pub monthly: u32,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            weekly: DEFAULT_WEEKLY_GOAL,
            monthly: DEFAULT_MONTHLY_GOAL,
        }
    }
}

fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

fn ring_fill(count: usize, goal: u32) -> f64 {
    (count as f64 / f64::from(goal.max(1))).min(1.0)
}

impl Goals {
    /// Builds goals, pulling each target into its allowed range.
    #[must_use]
    pub fn new(weekly: u32, monthly: u32) -> Self {
        Self {
            weekly: clamp_to(weekly, &WEEKLY_GOAL_RANGE),
            monthly: clamp_to(monthly, &MONTHLY_GOAL_RANGE),
        }
    }

    /// Fraction of the weekly target met, capped at 1.
    #[must_use]
    pub fn play_progress(&self, rounds_this_week: usize) -> f64 {
        ring_fill(rounds_this_week, self.weekly)
    }

    /// Fraction of the monthly target met over the last 30 days, capped at 1.
    #[must_use]
    pub fn consistency_progress(&self, rounds_last_30_days: usize) -> f64 {
        ring_fill(rounds_last_30_days, self.monthly)
    }
}

/// Goals persisted in the key-value store next to the active round.
pub struct GoalsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl GoalsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored goals; anything missing or unreadable falls back to the defaults.
    pub fn load(&self) -> Goals {
        Goals::new(
            self.kv.get_json_or(WEEKLY_GOAL_KEY, || DEFAULT_WEEKLY_GOAL),
            self.kv.get_json_or(MONTHLY_GOAL_KEY, || DEFAULT_MONTHLY_GOAL),
        )
    }

    /// Saves both targets, clamped, and returns what was stored.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn save(&self, goals: Goals) -> Result<Goals, StorageError> {
        let goals = Goals::new(goals.weekly, goals.monthly);
        self.kv.put_all(&[
            (WEEKLY_GOAL_KEY, serde_json::to_string(&goals.weekly)?),
            (MONTHLY_GOAL_KEY, serde_json::to_string(&goals.monthly)?),
        ])?;
        Ok(goals)
    }

    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn set_weekly(&self, weekly: u32) -> Result<Goals, StorageError> {
        let current = self.load();
        self.save(Goals::new(weekly, current.monthly))
    }

    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn set_monthly(&self, monthly: u32) -> Result<Goals, StorageError> {
        let current = self.load();
        self.save(Goals::new(current.weekly, monthly))
    }
}
