use worklog_db::{Database, StoreError};

fn db_with_users(users: &[&str]) -> Database {
    let db = Database::open_in_memory().unwrap();
    for u in users {
        db.create_user(u, "not-a-real-hash").unwrap();
    }
    db
}

#[test]
fn username_uniqueness_is_case_insensitive() {
    let db = db_with_users(&["alice"]);
    let err = db.create_user("Alice", "other-hash").unwrap_err();
    assert!(matches!(err, StoreError::UsernameTaken));
}

#[test]
fn user_lookup_follows_the_collation() {
    let db = db_with_users(&["Alice"]);
    let row = db.get_user("alice").unwrap().unwrap();
    // Stored casing wins over the lookup casing.
    assert_eq!(row.username, "Alice");
}

#[test]
fn public_projection_has_no_hash() {
    let db = db_with_users(&["alice"]);
    let row = db.get_user("alice").unwrap().unwrap();
    let json = serde_json::to_value(row.to_public()).unwrap();
    assert_eq!(json, serde_json::json!({"username": "alice"}));
}

#[test]
fn create_activity_rejects_empty_name() {
    let db = db_with_users(&["alice"]);
    let err = db.create_activity("alice", "").unwrap_err();
    assert!(matches!(err, StoreError::EmptyName));
}

#[test]
fn list_is_scoped_to_the_requesting_user() {
    let db = db_with_users(&["alice", "bob"]);
    db.create_activity("alice", "reading").unwrap();
    db.create_activity("bob", "running").unwrap();

    let alice = db.list_activities("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].name, "reading");
    assert!(alice[0].logs.is_empty());
}

#[test]
fn delete_by_non_owner_is_denied_and_leaves_the_activity() {
    let db = db_with_users(&["alice", "bob"]);
    let activity = db.create_activity("alice", "reading").unwrap();

    let err = db.delete_activity("bob", &activity.id).unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied));

    let alice = db.list_activities("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].id, activity.id);
}

#[test]
fn delete_of_missing_activity_reads_the_same_as_unowned() {
    let db = db_with_users(&["alice"]);
    let err = db.delete_activity("alice", "no-such-id").unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied));
}

#[test]
fn second_delete_of_the_same_activity_is_denied() {
    let db = db_with_users(&["alice"]);
    let activity = db.create_activity("alice", "reading").unwrap();

    db.delete_activity("alice", &activity.id).unwrap();
    let err = db.delete_activity("alice", &activity.id).unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied));
}

#[test]
fn deleting_an_activity_removes_its_logs() {
    let db = db_with_users(&["alice"]);
    let activity = db.create_activity("alice", "reading").unwrap();
    db.create_log("alice", &activity.id, Some("ch. 1"), 0, 1000).unwrap();
    db.create_log("alice", &activity.id, None, 1, 1000).unwrap();

    db.delete_activity("alice", &activity.id).unwrap();

    // Same id recreated fresh must come back with no logs attached.
    let again = db.create_activity("alice", "reading").unwrap();
    let listed = db.list_activities("alice").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, again.id);
    assert!(listed[0].logs.is_empty());
}

#[test]
fn create_log_under_unowned_activity_is_denied() {
    let db = db_with_users(&["alice", "bob"]);
    let activity = db.create_activity("alice", "reading").unwrap();

    let err = db
        .create_log("bob", &activity.id, None, 0, 500)
        .unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied));

    let alice = db.list_activities("alice").unwrap();
    assert!(alice[0].logs.is_empty());
}

#[test]
fn logs_list_in_insertion_order_not_date_order() {
    let db = db_with_users(&["alice"]);
    let activity = db.create_activity("alice", "reading").unwrap();

    db.create_log("alice", &activity.id, Some("later date first"), 900, 10).unwrap();
    let updated = db.create_log("alice", &activity.id, Some("earlier date second"), 100, 20).unwrap();

    assert_eq!(updated.logs.len(), 2);
    assert_eq!(updated.logs[0].date, 900);
    assert_eq!(updated.logs[1].date, 100);
}

#[test]
fn create_log_returns_the_merged_view() {
    let db = db_with_users(&["alice"]);
    let activity = db.create_activity("alice", "reading").unwrap();

    let updated = db
        .create_log("alice", &activity.id, Some("ch. 1"), 42, 1000)
        .unwrap();
    assert_eq!(updated.id, activity.id);
    assert_eq!(updated.logs.len(), 1);
    assert_eq!(updated.logs[0].summary.as_deref(), Some("ch. 1"));
    assert_eq!(updated.logs[0].date, 42);
    assert_eq!(updated.logs[0].duration, 1000);
}

#[test]
fn delete_log_through_unowned_parent_is_denied() {
    let db = db_with_users(&["alice", "bob"]);
    let activity = db.create_activity("alice", "reading").unwrap();
    let updated = db.create_log("alice", &activity.id, None, 0, 500).unwrap();
    let log_id = updated.logs[0].id.clone();

    let err = db.delete_log("bob", &activity.id, &log_id).unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied));

    let alice = db.list_activities("alice").unwrap();
    assert_eq!(alice[0].logs.len(), 1);
}

#[test]
fn delete_log_leaves_siblings_intact() {
    let db = db_with_users(&["alice"]);
    let activity = db.create_activity("alice", "reading").unwrap();
    db.create_log("alice", &activity.id, Some("keep"), 0, 1).unwrap();
    let updated = db.create_log("alice", &activity.id, Some("drop"), 1, 2).unwrap();
    let drop_id = updated.logs[1].id.clone();

    let after = db.delete_log("alice", &activity.id, &drop_id).unwrap();
    assert_eq!(after.logs.len(), 1);
    assert_eq!(after.logs[0].summary.as_deref(), Some("keep"));
}
