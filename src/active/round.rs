use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::model::{HistoricalRound, front_and_back_nine, hole_count};

/// Scores the hole-by-hole recorder accepts.
pub const HOLE_SCORE_RANGE: RangeInclusive<i32> = 1..=8;

/// The round currently being played, hole by hole.
///
/// `current_hole` is 1-based. `0` means nothing is in progress and
/// `max_holes() + 1` marks a card that has been filled in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ActiveRound {
    pub course_name: String,
    pub is_nine_hole: bool,
    pub current_hole: usize,
    pub hole_scores: Vec<i32>,
    pub date: DateTime<Utc>,
}

impl ActiveRound {
    #[must_use]
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            course_name: String::new(),
            is_nine_hole: false,
            current_hole: 0,
            hole_scores: Vec::new(),
            date: now,
        }
    }

    #[must_use]
    pub fn started(course_name: impl Into<String>, is_nine_hole: bool, now: DateTime<Utc>) -> Self {
        Self {
            course_name: course_name.into(),
            is_nine_hole,
            current_hole: 1,
            hole_scores: Vec::new(),
            date: now,
        }
    }

    #[must_use]
    pub fn max_holes(&self) -> usize {
        hole_count(self.is_nine_hole)
    }

    #[must_use]
    pub fn has_active_round(&self) -> bool {
        (1..=self.max_holes()).contains(&self.current_hole)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        let max_holes = self.max_holes();
        self.current_hole == max_holes + 1 && self.hole_scores.len() >= max_holes
    }

    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.hole_scores.iter().sum()
    }

    /// Writes `score` on the current hole and moves to the next one.
    ///
    /// Returns `false`, leaving the card untouched, when the score is outside
    /// [`HOLE_SCORE_RANGE`] or no hole is waiting to be played. Holes skipped
    /// on the way to `current_hole` are padded with `0`.
    pub fn record_score(&mut self, score: i32) -> bool {
        if !HOLE_SCORE_RANGE.contains(&score) || !self.has_active_round() {
            return false;
        }
        let max_holes = self.max_holes();
        let slot = self.current_hole - 1;
        if self.hole_scores.len() <= slot {
            self.hole_scores.resize(slot, 0);
            self.hole_scores.push(score);
        } else {
            self.hole_scores[slot] = score;
        }
        self.current_hole = if self.current_hole < max_holes {
            self.current_hole + 1
        } else {
            max_holes + 1
        };
        true
    }

    /// The card as a finished round, if every hole has been played.
    #[must_use]
    pub fn finished(&self) -> Option<FinishedRound> {
        self.is_complete().then(|| FinishedRound {
            course_name: self.course_name.clone(),
            is_nine_hole: self.is_nine_hole,
            total_score: self.total_score(),
            hole_scores: self.hole_scores.clone(),
            date: self.date,
        })
    }
}

/// What a completed card hands over to the history store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FinishedRound {
    pub course_name: String,
    pub is_nine_hole: bool,
    pub total_score: i32,
    pub hole_scores: Vec<i32>,
    pub date: DateTime<Utc>,
}

impl From<FinishedRound> for HistoricalRound {
    fn from(finished: FinishedRound) -> Self {
        let (front_nine_score, back_nine_score) = front_and_back_nine(
            &finished.hole_scores,
            finished.is_nine_hole,
            finished.total_score,
        );
        HistoricalRound {
            id: None,
            date: finished.date,
            course_name: finished.course_name,
            total_score: finished.total_score,
            front_nine_score,
            back_nine_score,
            notes: None,
            is_nine_hole: finished.is_nine_hole,
            hole_scores: Some(finished.hole_scores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tee_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 4, 8, 30, 0).unwrap()
    }

    #[test]
    fn every_valid_score_lands_on_the_current_hole() {
        for score in HOLE_SCORE_RANGE {
            let mut round = ActiveRound::started("Dunes", false, tee_time());
            round.current_hole = 7;
            round.hole_scores = vec![4; 6];
            assert!(round.record_score(score));
            assert_eq!(round.hole_scores[6], score);
            assert_eq!(round.current_hole, 8);
        }
    }

    #[test]
    fn out_of_range_scores_change_nothing() {
        let round = ActiveRound::started("Dunes", true, tee_time());
        for score in [i32::MIN, -1, 0, 9, 12, i32::MAX] {
            let mut attempt = round.clone();
            assert!(!attempt.record_score(score));
            assert_eq!(attempt, round);
        }
    }

    #[test]
    fn skipped_holes_are_padded_with_zero() {
        let mut round = ActiveRound::started("Dunes", false, tee_time());
        round.current_hole = 4;
        assert!(round.record_score(6));
        assert_eq!(round.hole_scores, vec![0, 0, 0, 6]);
        assert_eq!(round.current_hole, 5);
    }

    #[test]
    fn rewinding_overwrites_an_existing_hole() {
        let mut round = ActiveRound::started("Dunes", false, tee_time());
        round.hole_scores = vec![4, 5, 6];
        round.current_hole = 2;
        assert!(round.record_score(3));
        assert_eq!(round.hole_scores, vec![4, 3, 6]);
        assert_eq!(round.current_hole, 3);
    }

    #[test]
    fn last_hole_jumps_to_the_completion_marker() {
        let mut round = ActiveRound::started("Dunes", false, tee_time());
        round.current_hole = 18;
        round.hole_scores = vec![4; 17];
        assert!(round.record_score(5));
        assert_eq!(round.current_hole, 19);
        assert!(round.is_complete());
        assert!(!round.has_active_round());
        assert!(!round.record_score(4));
    }

    #[test]
    fn marker_without_enough_scores_is_not_complete() {
        let mut round = ActiveRound::started("Dunes", true, tee_time());
        round.current_hole = 10;
        round.hole_scores = vec![4; 8];
        assert!(!round.is_complete());
        assert!(round.finished().is_none());
    }

    #[test]
    fn finished_eighteen_converts_with_both_nines() {
        let mut round = ActiveRound::started("Dunes", false, tee_time());
        for hole in 1..=18 {
            round.record_score(if hole <= 9 { 4 } else { 5 });
        }
        let historical = HistoricalRound::from(round.finished().unwrap());
        assert_eq!(historical.total_score, 81);
        assert_eq!(historical.front_nine_score, Some(36));
        assert_eq!(historical.back_nine_score, Some(45));
        assert_eq!(historical.date, tee_time());
    }
}
