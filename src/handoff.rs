//! Moving a completed card from the shared store into the round history.

use log::{info, warn};

use crate::active::ActiveRoundStore;
use crate::model::HistoricalRound;
use crate::storage::{RoundStore, StorageError};

/// What the "Round complete" prompt shows before the user saves or discards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub course_name: String,
    pub is_nine_hole: bool,
    pub total_score: i32,
}

/// Checks the shared store for a finished card waiting to be saved.
pub fn pending_completion(active: &ActiveRoundStore) -> Option<CompletionPrompt> {
    let round = active.refresh();
    round.is_complete().then(|| CompletionPrompt {
        course_name: round.course_name.clone(),
        is_nine_hole: round.is_nine_hole,
        total_score: round.total_score(),
    })
}

/// Finishes the card and stores it as a new historical round.
///
/// `Ok(None)` means there was nothing complete to save. The card is cleared
/// only once the history holds the round.
///
/// # Errors
/// Returns an error if the round store rejects the insert. The completed card
/// stays in the shared store.
pub fn save_completed_round(
    active: &ActiveRoundStore,
    rounds: &dyn RoundStore,
) -> Result<Option<HistoricalRound>, StorageError> {
    let Some(finished) = active.refresh().finished() else {
        return Ok(None);
    };
    let mut round = HistoricalRound::from(finished);
    let id = rounds.insert_round(&round)?;
    round.id = Some(id);
    if active.finish_round().is_none() {
        warn!("round {id} saved but the card had already changed");
    }
    info!(
        "saved round {id} at '{}' with total {}",
        round.display_name(),
        round.total_score
    );
    Ok(Some(round))
}

/// Drops a completed card without saving it. Returns `false` when the card
/// in the store was not complete, leaving it untouched.
pub fn discard_completed_round(active: &ActiveRoundStore) -> bool {
    if !active.is_complete() {
        return false;
    }
    active.clear();
    true
}
