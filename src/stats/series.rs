use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::oldest_first;
use crate::handicap::{DEFAULT_RECENT_ROUNDS, estimated_handicap};
use crate::model::{HistoricalRound, ScoreScale};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// One point per round, oldest first, scored on `scale`.
#[must_use]
pub fn score_series(rounds: &[HistoricalRound], scale: ScoreScale) -> Vec<TrendPoint> {
    oldest_first(rounds)
        .into_iter()
        .map(|r| TrendPoint {
            date: r.date,
            value: r.score_on(scale),
        })
        .collect()
}

/// Handicap estimate as it stood after each round, oldest first.
#[must_use]
pub fn handicap_series(rounds: &[HistoricalRound]) -> Vec<TrendPoint> {
    let sorted = oldest_first(rounds);
    let scores: Vec<i32> = sorted.iter().map(|r| r.effective_score()).collect();
    sorted
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| {
            estimated_handicap(&scores[..=idx], DEFAULT_RECENT_ROUNDS).map(|value| TrendPoint {
                date: r.date,
                value,
            })
        })
        .collect()
}
