//! Derived statistics over the round history.
//!
//! Nothing here caches. Each call works on the slice it is given, so a result
//! describes the history as it was when the caller read it. Windowed queries
//! ("this week", "last 30 days") are measured from the `now` the
//! [`Statistics`] value was built with.

pub mod dashboard;
pub mod goals;
pub mod series;

pub use dashboard::*;
pub use goals::*;
pub use series::*;

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::Clock;
use crate::handicap::{DEFAULT_RECENT_ROUNDS, estimated_handicap};
use crate::model::{HistoricalRound, ScoreScale};

/// Rounds compared on each side of the trend window.
pub const TREND_WINDOW: usize = 5;
/// Strokes the recent window must move by before the trend is not flat.
pub const TREND_THRESHOLD: f64 = 1.0;
/// Earliest rounds that form the improvement baseline.
pub const BASELINE_ROUNDS: usize = 5;
/// Strokes of improvement that fill the improve ring.
pub const IMPROVE_TARGET_STROKES: f64 = 10.0;

/// First day of the calendar week. Weeks are computed on UTC dates.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Midnight UTC on the first day of the week containing `instant`.
    #[must_use]
    pub fn start_of_week(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.date_naive();
        let days_in = match self {
            WeekStart::Monday => date.weekday().num_days_from_monday(),
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        };
        let first_day = date - Duration::days(i64::from(days_in));
        first_day.and_time(NaiveTime::MIN).and_utc()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Flat,
    Worsening,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Improving => "Improving",
            Trend::Flat => "Flat",
            Trend::Worsening => "Worsening",
        };
        write!(f, "{s}")
    }
}

/// Rounds ordered newest first. Rounds sharing a date keep their input order.
#[must_use]
pub fn newest_first(rounds: &[HistoricalRound]) -> Vec<&HistoricalRound> {
    let mut sorted: Vec<&HistoricalRound> = rounds.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Rounds ordered oldest first. Rounds sharing a date keep their input order.
#[must_use]
pub fn oldest_first(rounds: &[HistoricalRound]) -> Vec<&HistoricalRound> {
    let mut sorted: Vec<&HistoricalRound> = rounds.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean of the `count` most recent rounds: raw totals, or 18-hole equivalents
/// when `normalize_to_18` is set.
#[must_use]
pub fn scoring_average(
    rounds: &[HistoricalRound],
    count: usize,
    normalize_to_18: bool,
) -> Option<f64> {
    let scale = if normalize_to_18 {
        ScoreScale::EighteenHoleEquivalent
    } else {
        ScoreScale::Raw
    };
    scoring_average_on(rounds, count, scale)
}

/// Mean of the `count` most recent rounds on the given scale.
#[must_use]
pub fn scoring_average_on(
    rounds: &[HistoricalRound],
    count: usize,
    scale: ScoreScale,
) -> Option<f64> {
    mean(
        newest_first(rounds)
            .into_iter()
            .take(count)
            .map(|r| r.score_on(scale)),
    )
}

/// Mean 18-hole-equivalent score of the `count` most recent rounds.
#[must_use]
pub fn effective_scoring_average(rounds: &[HistoricalRound], count: usize) -> Option<f64> {
    scoring_average(rounds, count, true)
}

/// Compares the five most recent effective scores with the five before them.
///
/// Lower is better, so a recent window more than one stroke below the
/// previous one is `Improving`. Without rounds on both sides it is `Flat`.
#[must_use]
pub fn trend(rounds: &[HistoricalRound]) -> Trend {
    let sorted = newest_first(rounds);
    let effective = |r: &&HistoricalRound| f64::from(r.effective_score());
    let last = mean(sorted.iter().take(TREND_WINDOW).map(effective));
    let previous = mean(
        sorted
            .iter()
            .skip(TREND_WINDOW)
            .take(TREND_WINDOW)
            .map(effective),
    );
    let (Some(last), Some(previous)) = (last, previous) else {
        return Trend::Flat;
    };
    let diff = previous - last;
    if diff > TREND_THRESHOLD {
        Trend::Improving
    } else if diff < -TREND_THRESHOLD {
        Trend::Worsening
    } else {
        Trend::Flat
    }
}

/// Mean effective score of the earliest five rounds, or of all of them when fewer.
#[must_use]
pub fn baseline_average(rounds: &[HistoricalRound]) -> Option<f64> {
    mean(
        oldest_first(rounds)
            .into_iter()
            .take(BASELINE_ROUNDS)
            .map(|r| f64::from(r.effective_score())),
    )
}

/// Share of a ten-stroke improvement over the baseline reached by the last
/// five rounds, clamped to `0.0..=1.0`.
#[must_use]
pub fn improve_ring_progress(rounds: &[HistoricalRound]) -> f64 {
    let (Some(baseline), Some(recent)) = (
        baseline_average(rounds),
        effective_scoring_average(rounds, TREND_WINDOW),
    ) else {
        return 0.0;
    };
    ((baseline - recent) / IMPROVE_TARGET_STROKES).clamp(0.0, 1.0)
}

/// Handicap estimate over the ten most recent effective scores.
#[must_use]
pub fn estimated_handicap_for(rounds: &[HistoricalRound]) -> Option<f64> {
    let scores: Vec<i32> = oldest_first(rounds)
        .into_iter()
        .map(HistoricalRound::effective_score)
        .collect();
    estimated_handicap(&scores, DEFAULT_RECENT_ROUNDS)
}

/// Time-windowed queries, pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct Statistics {
    now: DateTime<Utc>,
    week_start: WeekStart,
}

impl Statistics {
    #[must_use]
    pub fn new(now: DateTime<Utc>, week_start: WeekStart) -> Self {
        Self { now, week_start }
    }

    #[must_use]
    pub fn at(clock: &dyn Clock, week_start: WeekStart) -> Self {
        Self::new(clock.now(), week_start)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    #[must_use]
    pub fn start_of_week(&self) -> DateTime<Utc> {
        self.week_start.start_of_week(self.now)
    }

    fn count_since(rounds: &[HistoricalRound], since: DateTime<Utc>) -> usize {
        rounds.iter().filter(|r| r.date >= since).count()
    }

    #[must_use]
    pub fn rounds_this_week(&self, rounds: &[HistoricalRound]) -> usize {
        Self::count_since(rounds, self.start_of_week())
    }

    #[must_use]
    pub fn rounds_in_last_30_days(&self, rounds: &[HistoricalRound]) -> usize {
        Self::count_since(rounds, self.now - Duration::days(30))
    }

    /// Lowest raw total over the last 90 days.
    #[must_use]
    pub fn best_round_last_90_days(&self, rounds: &[HistoricalRound]) -> Option<i32> {
        let since = self.now - Duration::days(90);
        rounds
            .iter()
            .filter(|r| r.date >= since)
            .map(|r| r.total_score)
            .min()
    }

    /// Lowest score over the last 90 days on `scale`, rounded to whole strokes.
    #[must_use]
    pub fn best_round_last_90_days_on(
        &self,
        rounds: &[HistoricalRound],
        scale: ScoreScale,
    ) -> Option<i32> {
        let since = self.now - Duration::days(90);
        rounds
            .iter()
            .filter(|r| r.date >= since)
            .map(|r| r.score_on(scale))
            .min_by(f64::total_cmp)
            .map(|best| best.round() as i32)
    }

    /// Consecutive calendar weeks with at least one round, counting back from
    /// the current week. A current week without a round gives 0.
    #[must_use]
    pub fn weeks_played_in_row(&self, rounds: &[HistoricalRound]) -> usize {
        let mut streak = 0;
        let mut week_start = self.start_of_week();
        loop {
            let week_end = week_start + Duration::days(7);
            let played = rounds
                .iter()
                .any(|r| r.date >= week_start && r.date < week_end);
            if !played {
                return streak;
            }
            streak += 1;
            week_start -= Duration::days(7);
        }
    }
}
