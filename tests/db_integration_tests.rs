//! Integration tests for the database layer.
//!
//! These tests verify the core store operations using an in-memory SQLite
//! database, plus migration behavior against an on-disk file.

use chrono::NaiveDate;
use zen_checklist::db::Database;
use zen_checklist::types::Recurrence;

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

mod task_tests {
    use super::*;

    #[test]
    fn add_task_applies_defaults() {
        let db = setup_db();

        let task = db
            .add_task("Stretch", date("2026-08-07"), None, Recurrence::None)
            .expect("Failed to add task");

        assert_eq!(task.description, "Stretch");
        assert_eq!(task.category, "General");
        assert_eq!(task.order_index, 0);
        assert!(!task.completed);
        assert_eq!(task.recurrence, Recurrence::None);
        assert!(task.anchor_date.is_none());
        assert!(task.created_at > 0);
    }

    #[test]
    fn add_task_trims_description() {
        let db = setup_db();

        let task = db
            .add_task("  Water plants  ", date("2026-08-07"), None, Recurrence::None)
            .unwrap();

        assert_eq!(task.description, "Water plants");
    }

    #[test]
    fn add_task_rejects_empty_description() {
        let db = setup_db();

        assert!(db
            .add_task("", date("2026-08-07"), None, Recurrence::None)
            .is_err());
        assert!(db
            .add_task("   ", date("2026-08-07"), None, Recurrence::None)
            .is_err());
    }

    #[test]
    fn add_task_appends_to_open_ordering() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        let c = db.add_task("C", day, None, Recurrence::None).unwrap();

        assert_eq!(a.order_index, 0);
        assert_eq!(b.order_index, 1);
        assert_eq!(c.order_index, 2);
    }

    #[test]
    fn add_task_order_ignores_completed_tasks() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        db.mark_done(&[a.id]).unwrap();

        // The only task on the day is done, so the next task starts at 0.
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        assert_eq!(b.order_index, 0);
    }

    #[test]
    fn add_recurring_task_anchors_to_its_date() {
        let db = setup_db();
        let day = date("2026-08-03");

        let task = db
            .add_task("Review week", day, None, Recurrence::Weekly)
            .unwrap();

        assert_eq!(task.recurrence, Recurrence::Weekly);
        assert_eq!(task.anchor_date, Some(day));
    }

    #[test]
    fn add_task_with_category() {
        let db = setup_db();

        let task = db
            .add_task("Stretch", date("2026-08-07"), Some("Health"), Recurrence::None)
            .unwrap();

        assert_eq!(task.category, "Health");
    }

    #[test]
    fn get_task_returns_none_for_unknown_id() {
        let db = setup_db();

        assert!(db.get_task(9999).unwrap().is_none());
    }

    #[test]
    fn list_tasks_orders_open_before_completed() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        let c = db.add_task("C", day, None, Recurrence::None).unwrap();
        db.mark_done(&[a.id]).unwrap();

        let listed = db.list_tasks(day).unwrap();
        let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![b.id, c.id, a.id]);
        assert!(listed[2].completed);
    }

    #[test]
    fn list_tasks_is_scoped_to_the_date() {
        let db = setup_db();

        db.add_task("A", date("2026-08-06"), None, Recurrence::None)
            .unwrap();
        db.add_task("B", date("2026-08-07"), None, Recurrence::None)
            .unwrap();

        let listed = db.list_tasks(date("2026-08-07")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "B");
    }

    #[test]
    fn mark_done_counts_only_open_tasks() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();

        assert_eq!(db.mark_done(&[a.id, b.id, 9999]).unwrap(), 2);

        // Already done: nothing left to mutate.
        assert_eq!(db.mark_done(&[a.id]).unwrap(), 0);
    }

    #[test]
    fn remove_tasks_returns_removed_count() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        db.mark_done(&[b.id]).unwrap();

        // Removal is allowed from either state.
        assert_eq!(db.remove_tasks(&[a.id, b.id, 9999]).unwrap(), 2);
        assert!(db.get_task(a.id).unwrap().is_none());
        assert!(db.get_task(b.id).unwrap().is_none());
    }

    #[test]
    fn move_task_reindexes_contiguously() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        let c = db.add_task("C", day, None, Recurrence::None).unwrap();

        let open = db.move_task(day, c.id, 0).unwrap();

        let ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        let indexes: Vec<i64> = open.iter().map(|t| t.order_index).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn move_task_clamps_position_past_end() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();

        let open = db.move_task(day, a.id, 42).unwrap();

        let ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn move_task_fails_for_unknown_id() {
        let db = setup_db();

        assert!(db.move_task(date("2026-08-07"), 9999, 0).is_err());
    }

    #[test]
    fn completed_tasks_keep_their_stale_index() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, None, Recurrence::None).unwrap();
        let b = db.add_task("B", day, None, Recurrence::None).unwrap();
        let c = db.add_task("C", day, None, Recurrence::None).unwrap();
        db.mark_done(&[b.id]).unwrap();

        db.move_task(day, c.id, 0).unwrap();

        // b was at index 1 when it was completed; compaction never touches it.
        let b = db.get_task(b.id).unwrap().unwrap();
        assert_eq!(b.order_index, 1);

        let open = db.list_tasks(day).unwrap();
        let open_ids: Vec<i64> = open.iter().filter(|t| !t.completed).map(|t| t.id).collect();
        assert_eq!(open_ids, vec![c.id, a.id]);
    }

    #[test]
    fn done_ids_leave_the_open_ordering_domain() {
        let db = setup_db();
        let day = date("2026-08-07");

        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D", "E"] {
            ids.push(db.add_task(name, day, None, Recurrence::None).unwrap().id);
        }

        // Mark the third and fifth task done.
        db.mark_done(&[ids[2], ids[4]]).unwrap();

        let open = db.move_task(day, ids[0], 42).unwrap();
        let open_ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        let indexes: Vec<i64> = open.iter().map(|t| t.order_index).collect();

        assert!(!open_ids.contains(&ids[2]));
        assert!(!open_ids.contains(&ids[4]));
        assert_eq!(open_ids, vec![ids[1], ids[3], ids[0]]);
        assert_eq!(indexes, vec![0, 1, 2]);
    }
}

mod protein_tests {
    use super::*;

    #[test]
    fn save_protein_creates_row_on_first_save() {
        let db = setup_db();

        let total = db.save_protein(date("2026-08-07"), 20).unwrap();

        assert_eq!(total, 20);
        assert_eq!(db.protein_for(date("2026-08-07")).unwrap(), Some(20));
    }

    #[test]
    fn save_protein_accumulates() {
        let db = setup_db();
        let day = date("2026-08-07");

        db.save_protein(day, 20).unwrap();
        let total = db.save_protein(day, 30).unwrap();

        assert_eq!(total, 50);
        assert_eq!(db.protein_for(day).unwrap(), Some(50));
    }

    #[test]
    fn protein_is_tracked_per_date() {
        let db = setup_db();

        db.save_protein(date("2026-08-06"), 40).unwrap();
        db.save_protein(date("2026-08-07"), 25).unwrap();

        assert_eq!(db.protein_for(date("2026-08-06")).unwrap(), Some(40));
        assert_eq!(db.protein_for(date("2026-08-07")).unwrap(), Some(25));
    }

    #[test]
    fn protein_for_returns_none_when_unrecorded() {
        let db = setup_db();

        assert_eq!(db.protein_for(date("2026-08-07")).unwrap(), None);
    }
}

mod history_tests {
    use super::*;

    #[test]
    fn query_history_returns_tasks_and_protein() {
        let db = setup_db();
        let day = date("2026-08-07");

        let a = db.add_task("A", day, Some("Health"), Recurrence::None).unwrap();
        db.mark_done(&[a.id]).unwrap();
        db.add_task("B", day, None, Recurrence::None).unwrap();
        db.save_protein(day, 35).unwrap();

        let history = db.query_history(day).unwrap();

        assert_eq!(history.date, day);
        assert_eq!(history.tasks.len(), 2);
        assert_eq!(history.protein, Some(35));
        // Open tasks sort before completed in the history view too.
        assert!(!history.tasks[0].completed);
        assert!(history.tasks[1].completed);
    }

    #[test]
    fn query_history_for_an_empty_day() {
        let db = setup_db();

        let history = db.query_history(date("2026-08-07")).unwrap();

        assert!(history.tasks.is_empty());
        assert_eq!(history.protein, None);
    }
}

mod migration_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reopening_a_database_file_is_idempotent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("checklist.db");

        let task_id = {
            let db = Database::open(&db_path).expect("Failed to open database");
            db.add_task("Persisted", date("2026-08-07"), None, Recurrence::Daily)
                .unwrap()
                .id
        };

        // Reopening reruns the migration ladder against an up-to-date file.
        let db = Database::open(&db_path).expect("Failed to reopen database");
        let task = db.get_task(task_id).unwrap().expect("task survived reopen");

        assert_eq!(task.description, "Persisted");
        assert_eq!(task.recurrence, Recurrence::Daily);

        // And the store still accepts writes.
        db.add_task("After reopen", date("2026-08-07"), None, Recurrence::None)
            .unwrap();
    }
}
