mod common;

use rusty_golf_tracker::model::{RoundDraft, front_and_back_nine};
use rusty_golf_tracker::storage::{MemoryRoundStore, RoundStore, SqliteRoundStore};

use crate::common::{at, nine_hole_round, round_on, wednesday};

fn exercise_store(store: &dyn RoundStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut older = round_on(at(2026, 5, 1, 9), 92);
    older.course_name = "Dunes".to_string();
    older.notes = Some("windy".to_string());
    let newer = nine_hole_round(wednesday(), &[4, 5, 4, 3, 5, 4, 6, 4, 5]);

    let older_id = store.insert_round(&older)?;
    let newer_id = store.insert_round(&newer)?;
    assert_ne!(older_id, newer_id);

    let listed = store.rounds_by_date_desc()?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(newer_id));
    assert_eq!(listed[0].hole_scores, newer.hole_scores);
    assert!(listed[0].is_nine_hole);
    assert_eq!(listed[0].date, wednesday());
    assert_eq!(listed[1].notes.as_deref(), Some("windy"));
    assert_eq!(listed[1].hole_scores, None);

    let mut edited = listed[1].clone();
    edited.total_score = 90;
    store.update_round(&edited)?;
    let after = store.rounds_by_date_desc()?;
    assert_eq!(after[1].total_score, 90);
    assert_eq!(after[1].id, Some(older_id));

    assert!(store.delete_round(older_id)?);
    assert!(!store.delete_round(older_id)?);
    assert_eq!(store.rounds_by_date_desc()?.len(), 1);

    let mut missing = edited;
    missing.id = Some(9_999);
    assert!(store.update_round(&missing).is_err());
    missing.id = None;
    assert!(store.update_round(&missing).is_err());
    Ok(())
}

#[test]
fn test5_memory_round_store() -> Result<(), Box<dyn std::error::Error>> {
    exercise_store(&MemoryRoundStore::new())
}

#[test]
fn test5_sqlite_round_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rounds.sqlite");
    exercise_store(&SqliteRoundStore::open(&path)?)?;

    // survives a reopen
    let reopened = SqliteRoundStore::open(&path)?;
    let rounds = reopened.rounds_by_date_desc()?;
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].total_score, 40);
    Ok(())
}

#[test]
fn test5_same_day_rounds_list_latest_insert_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = SqliteRoundStore::open(dir.path().join("rounds.sqlite"))?;
    let first = store.insert_round(&round_on(wednesday(), 80))?;
    let second = store.insert_round(&round_on(wednesday(), 81))?;
    let ids: Vec<_> = store.rounds_by_date_desc()?.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(second), Some(first)]);
    Ok(())
}

#[test]
fn test5_manual_edit_keeps_identity() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryRoundStore::new();
    let mut draft = RoundDraft::new(wednesday());
    draft.course_name = "  Harbour  ".to_string();
    draft.set_hole_scores(&[5; 18]);
    let id = store.insert_round(&draft.validate()?)?;

    let stored = store.rounds_by_date_desc()?.remove(0);
    assert_eq!(stored.course_name, "Harbour");
    assert_eq!(stored.notes, None);
    assert_eq!(
        (stored.front_nine_score, stored.back_nine_score),
        front_and_back_nine(&[5; 18], false, 90)
    );

    let mut edit = RoundDraft::from_round(&stored);
    edit.hole_inputs[17] = "3".to_string();
    edit.notes = "birdie on 18".to_string();
    let updated = edit.apply_to(&stored)?;
    store.update_round(&updated)?;

    let reread = store.rounds_by_date_desc()?.remove(0);
    assert_eq!(reread.id, Some(id));
    assert_eq!(reread.total_score, 88);
    assert_eq!(reread.back_nine_score, Some(43));
    assert_eq!(reread.notes.as_deref(), Some("birdie on 18"));
    Ok(())
}
