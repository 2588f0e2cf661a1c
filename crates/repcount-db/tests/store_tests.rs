use repcount_db::{Database, ExerciseStat};
use repcount_parse::ExerciseRecord;
use tempfile::TempDir;

fn record(name: &str, reps: u32, weight: Option<f64>) -> ExerciseRecord {
    ExerciseRecord::new(name, reps, weight).unwrap()
}

// ============================================================
// Session lifecycle
// ============================================================

#[test]
fn test_start_creates_active_session() {
    let db = Database::open_in_memory().unwrap();

    assert!(db.workouts().active("u1").unwrap().is_none());

    let session = db.workouts().start("u1").unwrap();
    assert!(session.is_active());
    assert_eq!(session.user_id, "u1");

    let active = db.workouts().active("u1").unwrap().unwrap();
    assert_eq!(active.id, session.id);
    assert!(db.workouts().active("u2").unwrap().is_none());
}

#[test]
fn test_start_closes_stale_session() {
    let db = Database::open_in_memory().unwrap();

    let stale = db.workouts().start("u1").unwrap();
    let fresh = db.workouts().start("u1").unwrap();
    assert_ne!(stale.id, fresh.id);

    let stale = db.workouts().get(&stale.id).unwrap().unwrap();
    assert!(!stale.is_active());

    let active = db.workouts().active("u1").unwrap().unwrap();
    assert_eq!(active.id, fresh.id);
}

#[test]
fn test_stop_ends_active_session() {
    let db = Database::open_in_memory().unwrap();

    assert!(db.workouts().stop("u1").unwrap().is_none());

    let started = db.workouts().start("u1").unwrap();
    let stopped = db.workouts().stop("u1").unwrap().unwrap();
    assert_eq!(stopped.id, started.id);
    assert!(stopped.ended_at.is_some());

    assert!(db.workouts().active("u1").unwrap().is_none());
    assert!(db.workouts().stop("u1").unwrap().is_none());
}

#[test]
fn test_last_finished_session() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.workouts().last_finished("u1").unwrap().is_none());

    let first = db.workouts().start("u1").unwrap();
    db.workouts().stop("u1").unwrap();
    let second = db.workouts().start("u1").unwrap();
    db.workouts().stop("u1").unwrap();

    // An active session is never "last"
    db.workouts().start("u1").unwrap();

    let last = db.workouts().last_finished("u1").unwrap().unwrap();
    assert_eq!(last.id, second.id);
    assert_ne!(last.id, first.id);
}

// ============================================================
// Entries
// ============================================================

#[test]
fn test_entries_ordered_by_name_then_time() {
    let db = Database::open_in_memory().unwrap();
    let session = db.workouts().start("u1").unwrap();

    db.workouts()
        .add_entry(&session.id, &record("присідання", 10, None))
        .unwrap();
    db.workouts()
        .add_entry(&session.id, &record("жим лежачи", 8, Some(60.0)))
        .unwrap();
    db.workouts()
        .add_entry(&session.id, &record("присідання", 12, Some(22.5)))
        .unwrap();

    let entries = db.workouts().entries(&session.id).unwrap();
    let rows: Vec<(&str, i64, Option<f64>)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.reps, e.weight))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("жим лежачи", 8, Some(60.0)),
            ("присідання", 10, None),
            ("присідання", 12, Some(22.5)),
        ]
    );
}

#[test]
fn test_entries_scoped_to_session() {
    let db = Database::open_in_memory().unwrap();
    let first = db.workouts().start("u1").unwrap();
    db.workouts()
        .add_entry(&first.id, &record("планка", 1, None))
        .unwrap();
    let second = db.workouts().start("u1").unwrap();

    assert_eq!(db.workouts().entries(&first.id).unwrap().len(), 1);
    assert!(db.workouts().entries(&second.id).unwrap().is_empty());
}

// ============================================================
// Statistics
// ============================================================

#[test]
fn test_stats() {
    let db = Database::open_in_memory().unwrap();

    let empty = db.workouts().stats("u1").unwrap();
    assert_eq!(empty.finished_sessions, 0);
    assert_eq!(empty.total_entries, 0);
    assert!(empty.top_exercises.is_empty());

    let s1 = db.workouts().start("u1").unwrap();
    for (name, reps) in [("жим", 10), ("жим", 8), ("тяга", 5), ("планка", 1)] {
        db.workouts().add_entry(&s1.id, &record(name, reps, None)).unwrap();
    }
    db.workouts().stop("u1").unwrap();

    let s2 = db.workouts().start("u1").unwrap();
    for (name, reps) in [("тяга", 6), ("жим", 12), ("скручування", 20)] {
        db.workouts().add_entry(&s2.id, &record(name, reps, None)).unwrap();
    }

    // Another user's data stays out
    let other = db.workouts().start("u2").unwrap();
    db.workouts().add_entry(&other.id, &record("жим", 100, None)).unwrap();

    let stats = db.workouts().stats("u1").unwrap();
    assert_eq!(stats.finished_sessions, 1);
    assert_eq!(stats.total_entries, 7);
    assert_eq!(
        stats.top_exercises,
        vec![
            ExerciseStat { name: "жим".to_string(), sets: 3, total_reps: 30 },
            ExerciseStat { name: "тяга".to_string(), sets: 2, total_reps: 11 },
            ExerciseStat { name: "планка".to_string(), sets: 1, total_reps: 1 },
        ]
    );
}

// ============================================================
// On-disk database
// ============================================================

#[test]
fn test_reopen_persists_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("repcount.db");

    let session_id = {
        let db = Database::open_at(&path).unwrap();
        let session = db.workouts().start("u1").unwrap();
        db.workouts()
            .add_entry(&session.id, &record("віджимання", 25, None))
            .unwrap();
        db.workouts().stop("u1").unwrap();
        session.id
    };

    assert!(path.exists());

    let db = Database::open_at(&path).unwrap();
    let last = db.workouts().last_finished("u1").unwrap().unwrap();
    assert_eq!(last.id, session_id);
    let entries = db.workouts().entries(&session_id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "віджимання");
    assert_eq!(entries[0].reps, 25);
}

#[test]
fn test_default_path() {
    let path = Database::default_path();
    assert!(path.ends_with("repcount/repcount.db"));
}
