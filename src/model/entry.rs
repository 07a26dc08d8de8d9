use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;
use thiserror::Error;

use super::round::{EIGHTEEN_HOLES, HistoricalRound, front_and_back_nine, hole_count};

/// Accepted totals for a hand-entered nine-hole card.
pub const NINE_HOLE_TOTAL_RANGE: RangeInclusive<i32> = 20..=120;
/// Accepted totals for a hand-entered eighteen-hole card.
pub const EIGHTEEN_HOLE_TOTAL_RANGE: RangeInclusive<i32> = 40..=200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("hole {hole} needs a whole-number score")]
    MissingHole { hole: usize },
    #[error("{holes}-hole total {total} must be between {min} and {max}")]
    TotalOutOfRange {
        holes: usize,
        total: i32,
        min: i32,
        max: i32,
    },
}

/// Form state for adding or editing a round by hand.
///
/// `hole_inputs` always has eighteen slots; a nine-hole card only reads the
/// first nine, so toggling the length back and forth keeps what was typed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundDraft {
    pub date: DateTime<Utc>,
    pub course_name: String,
    pub notes: String,
    pub is_nine_hole: bool,
    pub hole_inputs: Vec<String>,
}

impl RoundDraft {
    #[must_use]
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            course_name: String::new(),
            notes: String::new(),
            is_nine_hole: false,
            hole_inputs: vec![String::new(); EIGHTEEN_HOLES],
        }
    }

    /// Pre-fills the form from a stored round.
    #[must_use]
    pub fn from_round(round: &HistoricalRound) -> Self {
        let mut draft = Self::new(round.date);
        draft.course_name = round.course_name.clone();
        draft.notes = round.notes.clone().unwrap_or_default();
        draft.is_nine_hole = round.is_nine_hole;
        if let Some(scores) = &round.hole_scores {
            draft.set_hole_scores(scores);
        }
        draft
    }

    /// Writes numeric scores into the leading slots; extra scores past 18 are dropped.
    pub fn set_hole_scores(&mut self, scores: &[i32]) {
        for (slot, score) in self.hole_inputs.iter_mut().zip(scores) {
            *slot = score.to_string();
        }
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        hole_count(self.is_nine_hole)
    }

    /// Scores for every visible hole, or the first hole that is blank or not a number.
    pub fn parsed_scores(&self) -> Result<Vec<i32>, EntryError> {
        (0..self.hole_count())
            .map(|idx| {
                self.hole_inputs
                    .get(idx)
                    .and_then(|input| input.trim().parse::<i32>().ok())
                    .ok_or(EntryError::MissingHole { hole: idx + 1 })
            })
            .collect()
    }

    /// Running total once every visible hole is filled.
    #[must_use]
    pub fn total(&self) -> Option<i32> {
        self.parsed_scores().ok().map(|scores| scores.iter().sum())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Builds a new, not-yet-stored round from the form.
    pub fn validate(&self) -> Result<HistoricalRound, EntryError> {
        let scores = self.parsed_scores()?;
        let total: i32 = scores.iter().sum();
        let range = if self.is_nine_hole {
            NINE_HOLE_TOTAL_RANGE
        } else {
            EIGHTEEN_HOLE_TOTAL_RANGE
        };
        if !range.contains(&total) {
            return Err(EntryError::TotalOutOfRange {
                holes: scores.len(),
                total,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let (front_nine_score, back_nine_score) =
            front_and_back_nine(&scores, self.is_nine_hole, total);
        let notes = if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.clone())
        };
        Ok(HistoricalRound {
            id: None,
            date: self.date,
            course_name: self.course_name.trim().to_string(),
            total_score: total,
            front_nine_score,
            back_nine_score,
            notes,
            is_nine_hole: self.is_nine_hole,
            hole_scores: Some(scores),
        })
    }

    /// Same as [`validate`](Self::validate) but keeps the identity of `existing`.
    pub fn apply_to(&self, existing: &HistoricalRound) -> Result<HistoricalRound, EntryError> {
        let mut round = self.validate()?;
        round.id = existing.id;
        Ok(round)
    }
}
