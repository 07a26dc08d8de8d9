use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NINE_HOLES: usize = 9;
pub const EIGHTEEN_HOLES: usize = 18;

/// Number of holes in a round of the given length.
#[must_use]
pub const fn hole_count(is_nine_hole: bool) -> usize {
    if is_nine_hole { NINE_HOLES } else { EIGHTEEN_HOLES }
}

/// A completed round as kept in the history store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoricalRound {
    /// Assigned by the round store; `None` until inserted.
    #[serde(default)]
    pub id: Option<i64>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub course_name: String,
    pub total_score: i32,
    #[serde(default)]
    pub front_nine_score: Option<i32>,
    #[serde(default)]
    pub back_nine_score: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_nine_hole: bool,
    #[serde(default)]
    pub hole_scores: Option<Vec<i32>>,
}

impl HistoricalRound {
    /// An 18-hole round with only a total, the minimum a manual entry needs.
    #[must_use]
    pub fn new(date: DateTime<Utc>, total_score: i32) -> Self {
        Self {
            id: None,
            date,
            course_name: String::new(),
            total_score,
            front_nine_score: None,
            back_nine_score: None,
            notes: None,
            is_nine_hole: false,
            hole_scores: None,
        }
    }

    /// Per-hole scores when they exist; an empty list counts as absent.
    #[must_use]
    pub fn recorded_holes(&self) -> Option<&[i32]> {
        match self.hole_scores.as_deref() {
            Some(scores) if !scores.is_empty() => Some(scores),
            _ => None,
        }
    }

    /// Strokes as played: the per-hole sum when recorded, else `total_score`.
    #[must_use]
    pub fn played_score(&self) -> i32 {
        if let Some(scores) = self.recorded_holes() {
            scores.iter().sum()
        } else {
            self.total_score
        }
    }

    /// Score on an 18-hole scale; nine-hole rounds count double.
    #[must_use]
    pub fn effective_score(&self) -> i32 {
        let multiplier = if self.is_nine_hole { 2 } else { 1 };
        self.played_score() * multiplier
    }

    /// Total on a 9-hole scale; eighteen-hole totals are halved.
    #[must_use]
    pub fn nine_hole_equivalent_score(&self) -> f64 {
        if self.is_nine_hole {
            f64::from(self.total_score)
        } else {
            f64::from(self.total_score) / 2.0
        }
    }

    #[must_use]
    pub fn score_on(&self, scale: ScoreScale) -> f64 {
        match scale {
            ScoreScale::Raw => f64::from(self.total_score),
            ScoreScale::NineHoleEquivalent => self.nine_hole_equivalent_score(),
            ScoreScale::EighteenHoleEquivalent => f64::from(self.effective_score()),
        }
    }

    /// Course name for listings; blank names read as "Round".
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.course_name.trim();
        if trimmed.is_empty() { "Round" } else { trimmed }
    }
}

/// Which scale a score is compared on.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// `total_score` exactly as recorded.
    #[default]
    Raw,
    #[value(name = "nine")]
    NineHoleEquivalent,
    #[value(name = "eighteen")]
    EighteenHoleEquivalent,
}

impl fmt::Display for ScoreScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreScale::Raw => "raw",
            ScoreScale::NineHoleEquivalent => "9-hole equivalent",
            ScoreScale::EighteenHoleEquivalent => "18-hole equivalent",
        };
        write!(f, "{s}")
    }
}

/// Front and back nine totals for a finished card.
///
/// Nine-hole rounds put the whole total on the front and leave the back empty.
/// Eighteen-hole rounds sum holes 1-9 and 10-18; a side with no holes is `None`.
#[must_use]
pub fn front_and_back_nine(
    hole_scores: &[i32],
    is_nine_hole: bool,
    total_score: i32,
) -> (Option<i32>, Option<i32>) {
    if is_nine_hole {
        return (Some(total_score), None);
    }
    let split = hole_scores.len().min(NINE_HOLES);
    let (front, back) = hole_scores.split_at(split);
    let side_total = |side: &[i32]| (!side.is_empty()).then(|| side.iter().sum::<i32>());
    (side_total(front), side_total(back))
}
