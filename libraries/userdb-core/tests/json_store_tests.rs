//! Integration tests for the JSON file store
//!
//! Covers the full read-modify-write cycle of every operation:
//! - Id assignment from the increment counter
//! - Partial updates that only touch the display name
//! - Deletes that never reclaim ids
//! - Not-found and internal error classification


use chrono::{DateTime, Utc};
use test_helpers::*;
use userdb_core::{JsonFileStore, StoreError, UpdateUserRequest, UserId, UserRepository};

// ============================================================================
// Insert / Get
// ============================================================================

#[test]
fn test_insert_assigns_next_increment() {
    let test_store = TestStore::with_contents(TWO_USERS);
    let before = test_store.envelope().increment;

    let id = test_store
        .store
        .insert(create_request("Cid", "c@x.com"))
        .expect("Failed to insert user");

    assert_eq!(id.as_str(), (before + 1).to_string());
    let after = test_store.envelope();
    assert_eq!(after.increment, before + 1);
    assert_eq!(after.list.len(), 3);
}

#[test]
fn test_insert_then_get() {
    let test_store = TestStore::new();
    let started = Utc::now();

    let id = test_store
        .store
        .insert(create_request("Ann", "a@x.com"))
        .unwrap();
    let user = test_store.store.get(&id).expect("User not found");

    assert_eq!(user.display_name, "Ann");
    assert_eq!(user.email, "a@x.com");
    assert_ne!(user.created_at, DateTime::<Utc>::default());
    assert!(user.created_at >= started - chrono::Duration::seconds(1));
}

#[test]
fn test_insert_accepts_empty_fields() {
    let test_store = TestStore::new();

    let id = test_store.store.insert(create_request("", "")).unwrap();
    let user = test_store.store.get(&id).unwrap();

    assert_eq!(user.display_name, "");
    assert_eq!(user.email, "");
}

#[test]
fn test_insert_never_reuses_deleted_ids() {
    let test_store = TestStore::new();

    let first = test_store.store.insert(create_request("Ann", "a@x.com")).unwrap();
    test_store.store.delete(&first).unwrap();
    let second = test_store.store.insert(create_request("Bob", "b@x.com")).unwrap();

    assert_eq!(first.as_str(), "1");
    assert_eq!(second.as_str(), "2");
}

#[test]
fn test_insert_fails_when_counter_exhausted() {
    let contents = format!(r#"{{"increment":{},"list":{{}}}}"#, u64::MAX);
    let test_store = TestStore::with_contents(&contents);
    let before = test_store.bytes();

    let err = test_store
        .store
        .insert(create_request("Ann", "a@x.com"))
        .unwrap_err();

    assert!(matches!(err, StoreError::Internal(_)));
    assert_eq!(test_store.bytes(), before);
}

#[test]
fn test_get_unknown_id() {
    let test_store = TestStore::with_contents(TWO_USERS);

    let err = test_store.store.get(&UserId::new("3")).unwrap_err();

    assert!(matches!(err, StoreError::UserNotFound(ref id) if id.as_str() == "3"));
}

// ============================================================================
// GetAll
// ============================================================================

#[test]
fn test_get_all_returns_every_record() {
    let test_store = TestStore::with_contents(TWO_USERS);

    let all = test_store.store.get_all().unwrap();

    assert_eq!(all.increment, 2);
    assert_eq!(all.list.len(), 2);
    assert_eq!(all.list["1"].display_name, "Ann");
    assert_eq!(all.list["2"].display_name, "Bob");
}

#[test]
fn test_get_all_empty_store() {
    let test_store = TestStore::new();

    let all = test_store.store.get_all().unwrap();

    assert_eq!(all.increment, 0);
    assert!(all.list.is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_changes_only_display_name() {
    let test_store = TestStore::with_contents(TWO_USERS);
    let id = UserId::new("1");
    let before = test_store.store.get(&id).unwrap();

    test_store
        .store
        .update(
            &id,
            UpdateUserRequest {
                display_name: "Annie".to_string(),
            },
        )
        .expect("Failed to update user");

    let after = test_store.store.get(&id).unwrap();
    assert_eq!(after.display_name, "Annie");
    assert_eq!(after.email, before.email);
    assert_eq!(after.created_at, before.created_at);

    // Other records and the counter are untouched
    let envelope = test_store.envelope();
    assert_eq!(envelope.increment, 2);
    assert_eq!(envelope.list["2"].display_name, "Bob");
}

#[test]
fn test_update_unknown_id_leaves_file_untouched() {
    let test_store = TestStore::with_contents(TWO_USERS);
    let before = test_store.bytes();

    let err = test_store
        .store
        .update(
            &UserId::new("42"),
            UpdateUserRequest {
                display_name: "Nobody".to_string(),
            },
        )
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(test_store.bytes(), before);
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_removes_exactly_one_key() {
    let test_store = TestStore::with_contents(TWO_USERS);
    let id = UserId::new("1");

    test_store.store.delete(&id).expect("Failed to delete user");

    let envelope = test_store.envelope();
    assert_eq!(envelope.increment, 2);
    assert_eq!(envelope.list.len(), 1);
    assert!(envelope.list.contains_key("2"));

    let err = test_store.store.get(&id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_delete_unknown_id_leaves_file_untouched() {
    let test_store = TestStore::with_contents(TWO_USERS);
    let before = test_store.bytes();

    let err = test_store.store.delete(&UserId::new("9")).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(test_store.bytes(), before);
}

// ============================================================================
// Failure classification
// ============================================================================

#[test]
fn test_missing_file_is_internal_for_every_operation() {
    let test_store = TestStore::missing();
    let id = UserId::new("1");

    let results = [
        test_store.store.get_all().map(|_| ()),
        test_store.store.get(&id).map(|_| ()),
        test_store
            .store
            .insert(create_request("Ann", "a@x.com"))
            .map(|_| ()),
        test_store.store.update(
            &id,
            UpdateUserRequest {
                display_name: "Ann".to_string(),
            },
        ),
        test_store.store.delete(&id),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.code(), "internal_server_error");
    }

    // Operations never create the file
    assert!(!test_store.path().exists());
}

#[test]
fn test_corrupt_file_is_internal() {
    let test_store = TestStore::with_contents("{not json");

    let err = test_store.store.get(&UserId::new("1")).unwrap_err();

    assert!(matches!(err, StoreError::Internal(_)));
    assert_eq!(err.status_code(), 500);
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn test_seed_writes_empty_envelope() {
    let test_store = TestStore::missing();

    JsonFileStore::seed(test_store.path()).expect("Failed to seed store");

    let value: serde_json::Value = serde_json::from_slice(&test_store.bytes()).unwrap();
    assert_eq!(value, serde_json::json!({"increment": 0, "list": {}}));
}

#[test]
fn test_seed_refuses_existing_file() {
    let test_store = TestStore::with_contents(TWO_USERS);

    let err = JsonFileStore::seed(test_store.path()).unwrap_err();

    assert!(matches!(err, StoreError::Internal(_)));
    assert_eq!(test_store.envelope().list.len(), 2);
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[test]
fn test_create_get_delete_scenario() {
    let test_store = TestStore::new();

    let id = test_store
        .store
        .insert(create_request("Ann", "a@x.com"))
        .unwrap();
    assert_eq!(id.as_str(), "1");

    let value: serde_json::Value = serde_json::from_slice(&test_store.bytes()).unwrap();
    assert_eq!(value["increment"], 1);
    assert_eq!(value["list"]["1"]["display_name"], "Ann");
    assert_eq!(value["list"]["1"]["email"], "a@x.com");
    assert!(value["list"]["1"]["created_at"].is_string());

    let user = test_store.store.get(&id).unwrap();
    assert_eq!(user.display_name, "Ann");

    test_store.store.delete(&id).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&test_store.bytes()).unwrap();
    assert_eq!(value, serde_json::json!({"increment": 1, "list": {}}));

    assert!(test_store.store.get(&id).unwrap_err().is_not_found());
}

#[test]
fn test_stores_on_same_file_see_each_others_writes() {
    let test_store = TestStore::new();
    let other = JsonFileStore::new(test_store.path());

    let id = test_store
        .store
        .insert(create_request("Ann", "a@x.com"))
        .unwrap();

    // No in-process cache: a second handle reads the fresh file
    assert_eq!(other.get(&id).unwrap().email, "a@x.com");
    let next = other.insert(create_request("Bob", "b@x.com")).unwrap();
    assert_eq!(next.as_str(), "2");
}
