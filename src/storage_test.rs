use super::*;
use crate::api::types::Role;
use uuid::Uuid;

fn sample_user() -> User {
    User {
        id: Uuid::from_u128(7),
        email: "aline@servicerw.rw".into(),
        name: "Aline Mukamana".into(),
        phone: None,
        role: Role::Customer,
        verified: true,
        permissions: ["write_reviews".to_string()].into_iter().collect(),
        business: None,
    }
}

// =============================================================================
// DOCUMENT SHAPE
// =============================================================================

#[test]
fn document_uses_the_three_original_keys() {
    let doc = PersistedSession::authenticated(sample_user(), true);
    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains(r#""user""#));
    assert!(json.contains(r#""isAuthenticated":true"#));
    assert!(json.contains(r#""rememberMe":true"#));
    assert!(!json.contains("is_authenticated"));
}

#[test]
fn anonymous_document_has_no_user_key() {
    let json = serde_json::to_string(&PersistedSession::anonymous()).unwrap();
    assert!(!json.contains(r#""user""#));
    assert!(json.contains(r#""isAuthenticated":false"#));
}

#[test]
fn document_tolerates_missing_fields() {
    let doc: PersistedSession = serde_json::from_str("{}").unwrap();
    assert_eq!(doc, PersistedSession::anonymous());
}

// =============================================================================
// FILE STORE
// =============================================================================

#[test]
fn file_store_round_trips_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let doc = PersistedSession::authenticated(sample_user(), false);
    store.save(&doc).unwrap();

    assert_eq!(store.load().unwrap(), doc);
}

#[test]
fn file_store_missing_file_loads_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert_eq!(store.load().unwrap(), PersistedSession::anonymous());
}

#[test]
fn file_store_creates_missing_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(&dir.path().join("nested").join("deeper"));
    store.save(&PersistedSession::anonymous()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn file_store_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .save(&PersistedSession::authenticated(sample_user(), true))
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["session.json".to_string()]);
}

#[test]
fn file_store_clear_removes_the_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .save(&PersistedSession::authenticated(sample_user(), true))
        .unwrap();

    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), PersistedSession::anonymous());
}

#[test]
fn file_store_corrupt_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path(), "{not json").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[test]
fn file_store_save_overwrites_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store
        .save(&PersistedSession::authenticated(sample_user(), true))
        .unwrap();
    store.save(&PersistedSession::anonymous()).unwrap();

    assert_eq!(store.load().unwrap(), PersistedSession::anonymous());
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[test]
fn memory_store_round_trips_and_clears() {
    let store = MemoryStore::new();
    assert_eq!(store.load().unwrap(), PersistedSession::anonymous());

    let doc = PersistedSession::authenticated(sample_user(), true);
    store.save(&doc).unwrap();
    assert_eq!(store.load().unwrap(), doc);

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), PersistedSession::anonymous());
}
