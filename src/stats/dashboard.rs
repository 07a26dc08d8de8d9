use serde::{Deserialize, Serialize};

use super::{
    Statistics, TREND_WINDOW, Trend, estimated_handicap_for, improve_ring_progress,
    scoring_average, trend,
};
use crate::model::HistoricalRound;
use crate::stats::goals::Goals;

/// Everything the home screen shows, computed in one pass over the history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardSummary {
    pub play_progress: f64,
    pub consistency_progress: f64,
    pub improve_progress: f64,
    pub scoring_average: Option<f64>,
    pub best_round: Option<i32>,
    pub estimated_handicap: Option<f64>,
    pub trend: Trend,
    pub weeks_played_in_row: usize,
    pub rounds_this_week: usize,
    pub rounds_last_30_days: usize,
    pub total_rounds: usize,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(stats: &Statistics, goals: &Goals, rounds: &[HistoricalRound]) -> Self {
        let rounds_this_week = stats.rounds_this_week(rounds);
        let rounds_last_30_days = stats.rounds_in_last_30_days(rounds);
        Self {
            play_progress: goals.play_progress(rounds_this_week),
            consistency_progress: goals.consistency_progress(rounds_last_30_days),
            improve_progress: improve_ring_progress(rounds),
            scoring_average: scoring_average(rounds, TREND_WINDOW, false),
            best_round: stats.best_round_last_90_days(rounds),
            estimated_handicap: estimated_handicap_for(rounds),
            trend: trend(rounds),
            weeks_played_in_row: stats.weeks_played_in_row(rounds),
            rounds_this_week,
            rounds_last_30_days,
            total_rounds: rounds.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_rounds == 0
    }
}
