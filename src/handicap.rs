//! Simplified handicap estimate.
//!
//! This is the mean of recent 18-hole-equivalent scores minus a flat par of 72.
//! It deliberately ignores course slope and rating, score differentials and
//! the best-of-N selection an official index uses.

pub const PAR: f64 = 72.0;
pub const DEFAULT_RECENT_ROUNDS: usize = 10;

/// Average of the last `recent_count` entries of `scores`, minus [`PAR`].
///
/// The list is clipped from its end, so callers decide which rounds count by
/// the order they pass them in (oldest-to-newest keeps the most recent ones).
/// Returns `None` for an empty list or a zero window.
#[must_use]
pub fn estimated_handicap(scores: &[i32], recent_count: usize) -> Option<f64> {
    if scores.is_empty() || recent_count == 0 {
        return None;
    }
    let recent = &scores[scores.len().saturating_sub(recent_count)..];
    let sum: i64 = recent.iter().map(|&s| i64::from(s)).sum();
    Some(sum as f64 / recent.len() as f64 - PAR)
}
