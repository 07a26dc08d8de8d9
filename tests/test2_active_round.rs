mod common;

use std::sync::Arc;

use rusty_golf_tracker::active::{ActiveRoundStore, keys};
use rusty_golf_tracker::storage::{KeyValueStoreExt, MemoryKv};

use crate::common::{BrokenKv, fixed_clock, wednesday};

fn fresh_store() -> (ActiveRoundStore, MemoryKv) {
    let kv = MemoryKv::new();
    let store = ActiveRoundStore::new(Arc::new(kv.clone()), fixed_clock(wednesday()));
    (store, kv)
}

#[test]
fn test2_links_nine_holes_to_finish() {
    let (store, kv) = fresh_store();
    assert!(!store.has_active_round());

    store.start_round("Links", true);
    assert!(store.has_active_round());
    for score in [5, 4, 5, 4, 5, 4, 5, 4, 5] {
        assert!(store.record_score(score));
    }

    let card = store.refresh();
    assert_eq!(card.current_hole, 10);
    assert!(card.is_complete());
    assert!(!card.has_active_round());
    assert_eq!(store.total_score(), 41);

    // nothing left to score
    assert!(!store.record_score(4));
    assert_eq!(store.refresh().hole_scores.len(), 9);

    let finished = store.finish_round().expect("complete card");
    assert_eq!(finished.course_name, "Links");
    assert!(finished.is_nine_hole);
    assert_eq!(finished.total_score, 41);
    assert_eq!(finished.date, wednesday());

    let cleared = store.refresh();
    assert_eq!(cleared.current_hole, 0);
    assert!(cleared.course_name.is_empty());
    assert!(cleared.hole_scores.is_empty());
    assert_eq!(kv.get_json::<usize>(keys::CURRENT_HOLE).unwrap(), Some(0));
}

#[test]
fn test2_out_of_range_scores_leave_the_card_alone() {
    let (store, _kv) = fresh_store();
    store.start_round("Dunes", false);
    let before = store.refresh();
    for score in [0, 9, -3, 100] {
        assert!(!store.record_score(score));
    }
    assert_eq!(store.refresh(), before);
}

#[test]
fn test2_eighteenth_hole_moves_to_sentinel() {
    let (store, _kv) = fresh_store();
    store.start_round("Dunes", false);
    for _ in 0..17 {
        store.record_score(5);
    }
    assert_eq!(store.refresh().current_hole, 18);
    assert!(!store.is_complete());
    store.record_score(3);
    let card = store.refresh();
    assert_eq!(card.current_hole, 19);
    assert_eq!(card.total_score(), 17 * 5 + 3);
    assert!(card.is_complete());
}

#[test]
fn test2_finish_before_the_last_hole_is_a_no_op() {
    let (store, _kv) = fresh_store();
    store.start_round("Dunes", true);
    store.record_score(4);
    let before = store.refresh();
    assert!(store.finish_round().is_none());
    assert_eq!(store.refresh(), before);
}

#[test]
fn test2_clear_twice_matches_clear_once() {
    let (store, _kv) = fresh_store();
    store.start_round("Dunes", true);
    store.record_score(4);

    store.clear();
    let once = store.refresh();
    store.clear();
    assert_eq!(store.refresh(), once);
    assert!(!once.has_active_round());
}

#[test]
fn test2_restart_replaces_the_card() {
    let (store, _kv) = fresh_store();
    store.start_round("Dunes", true);
    store.record_score(6);
    store.start_round("Links", false);
    let card = store.refresh();
    assert_eq!(card.course_name, "Links");
    assert_eq!(card.current_hole, 1);
    assert!(card.hole_scores.is_empty());
    assert_eq!(card.max_holes(), 18);
}

#[test]
fn test2_unavailable_store_degrades_to_defaults() {
    let store = ActiveRoundStore::new(Arc::new(BrokenKv), fixed_clock(wednesday()));
    let card = store.refresh();
    assert_eq!(card.current_hole, 0);
    assert_eq!(card.date, wednesday());
    assert!(card.course_name.is_empty());

    // the write fails but the local mirror still moves
    store.start_round("Links", true);
    assert_eq!(store.cached().current_hole, 1);
    assert_eq!(store.cached().course_name, "Links");

    // a fresh read sees nothing, so scoring is ignored
    assert!(!store.record_score(4));
    assert!(!store.has_active_round());
    assert!(store.finish_round().is_none());
}
