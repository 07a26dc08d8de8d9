use crate::model::entry::EntryError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TrackerError {
    #[error("db error: {0}")]
    Db(String),
    #[error("invalid round: {0}")]
    Validation(#[from] EntryError),
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for TrackerError {
    fn from(err: StorageError) -> Self {
        Self::Db(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_and_entry_errors_map_to_variants() {
        let db: TrackerError = StorageError::new("disk full").into();
        assert_eq!(db.to_string(), "db error: disk full");

        let invalid: TrackerError = EntryError::MissingHole { hole: 3 }.into();
        assert_eq!(
            invalid.to_string(),
            "invalid round: hole 3 needs a whole-number score"
        );
    }
}
