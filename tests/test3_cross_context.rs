mod common;

use std::sync::Arc;

use rusty_golf_tracker::active::{ActiveRoundStore, WidgetSurface, keys};
use rusty_golf_tracker::storage::{KeyValueStore, KeyValueStoreExt, MemoryKv, SqliteKv};

use crate::common::{RecordingKv, fixed_clock, wednesday};

fn contexts(kv: Arc<dyn KeyValueStore>) -> (ActiveRoundStore, WidgetSurface) {
    let app = ActiveRoundStore::new(kv.clone(), fixed_clock(wednesday()));
    let widget = WidgetSurface::new(kv, fixed_clock(wednesday()));
    (app, widget)
}

#[test]
fn test3_widget_sees_what_the_app_started() {
    let kv = MemoryKv::new();
    let (app, _) = contexts(Arc::new(kv.clone()));
    let widget = WidgetSurface::new(Arc::new(kv), fixed_clock(wednesday()));

    assert!(!widget.load_entry().has_active_round());
    app.start_round("Links", true);

    let entry = widget.load_entry();
    assert!(entry.has_active_round());
    assert_eq!(entry.course_name, "Links");
    assert_eq!(entry.current_hole, 1);
    assert!(entry.is_nine_hole);
    assert_eq!(widget.score_triggers().collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
}

#[test]
fn test3_interleaved_scores_converge() {
    let (app, widget) = contexts(Arc::new(MemoryKv::new()));
    app.start_round("Links", true);

    assert!(widget.record_score(4));
    assert!(app.record_score(5));
    assert!(widget.record_score(3));
    assert!(app.record_score(4));

    let card = app.refresh();
    assert_eq!(card.hole_scores, vec![4, 5, 3, 4]);
    assert_eq!(card.current_hole, 5);
    assert_eq!(widget.load_entry().current_hole, 5);
    // the app's own copy was stale until it reloaded
    assert_eq!(app.cached(), card);
}

#[test]
fn test3_widget_writes_only_the_scorecard() {
    let recording = Arc::new(RecordingKv::default());
    let (app, widget) = contexts(recording.clone());
    app.start_round("Links", true);
    assert_eq!(recording.last_batch().len(), 5);

    recording
        .put_json(keys::COURSE_NAME, "Links (renamed)")
        .unwrap();
    assert!(widget.record_score(4));
    let mut written = recording.last_batch();
    written.sort();
    assert_eq!(written, vec![keys::CURRENT_HOLE.to_string(), keys::HOLE_SCORES.to_string()]);
    assert_eq!(app.refresh().course_name, "Links (renamed)");
}

#[test]
fn test3_widget_ignores_scores_without_a_hole_in_play() {
    let (app, widget) = contexts(Arc::new(MemoryKv::new()));
    assert!(!widget.record_score(4));

    app.start_round("Links", true);
    for _ in 0..9 {
        assert!(widget.record_score(4));
    }
    assert!(app.is_complete());
    assert!(!widget.record_score(4));
    assert!(!widget.load_entry().has_active_round());
    assert!(!widget.record_score(0));
    assert_eq!(app.total_score(), 36);
}

#[test]
fn test3_two_sqlite_handles_share_the_round() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shared.sqlite");

    let app = ActiveRoundStore::new(Arc::new(SqliteKv::open(&path)?), fixed_clock(wednesday()));
    let widget = WidgetSurface::new(Arc::new(SqliteKv::open(&path)?), fixed_clock(wednesday()));

    app.start_round("Harbour", false);
    assert_eq!(widget.load_entry().course_name, "Harbour");
    assert!(widget.record_score(6));
    assert!(app.record_score(5));
    assert_eq!(app.refresh().hole_scores, vec![6, 5]);
    drop(app);

    let reopened =
        ActiveRoundStore::new(Arc::new(SqliteKv::open(&path)?), fixed_clock(wednesday()));
    let card = reopened.cached();
    assert_eq!(card.course_name, "Harbour");
    assert_eq!(card.current_hole, 3);
    assert_eq!(card.date, wednesday());
    Ok(())
}
