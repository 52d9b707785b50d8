//! The record store over a JSON file on disk

mod record_harness;

use flagged::prelude::*;
use record_harness::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

fn file_store(records: &[Record]) -> (TempDir, PathBuf, RecordStore<JsonFileStorage>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock-post.json");
    write_collection(&path, records);
    let store = RecordStore::new(JsonFileStorage::new(&path));
    (dir, path, store)
}

fn read_document(path: &std::path::Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_query_reads_the_file() {
    let (_dir, _path, store) = file_store(&seeded_records(25));

    let page = store.query(&RecordFilter::new()).await;
    assert_eq!(page.total, 25);
    assert_eq!(page.data.len(), 20);
    assert_eq!(page.data[0].id, 25);
}

#[tokio::test]
async fn test_external_edits_are_visible() {
    let (_dir, path, store) = file_store(&seeded_records(3));
    assert_eq!(store.stats().await.total_records, 3);

    write_collection(&path, &seeded_records(7));
    assert_eq!(store.stats().await.total_records, 7);
    assert!(store.get(7).await.is_some());
}

#[tokio::test]
async fn test_mutation_survives_a_new_store() {
    let (_dir, path, store) = file_store(&seeded_records(5));

    store.set_status(2, RecordStatus::Dismissed).await.unwrap();
    store.add_tag(2, "reviewed").await.unwrap();

    let reopened = RecordStore::new(JsonFileStorage::new(&path));
    let record = reopened.get(2).await.unwrap();
    assert_eq!(record.status, RecordStatus::Dismissed);
    assert!(record.has_tag("reviewed"));
}

#[tokio::test]
async fn test_document_stays_a_pretty_array_with_original_timestamps() {
    let mut records = seeded_records(4);
    records[0].created_at = "2024-01-01T12:00:00+02:00".to_string();
    records[1].created_at = "2024-01-02T12:00:00.123456Z".to_string();
    let (_dir, path, store) = file_store(&records);

    store.add_tag(4, "escalated").await.unwrap();
    store.remove_tag(3, "nothing").await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {\n    \"id\": 1,"));

    let document = read_document(&path);
    let array = document.as_array().expect("top-level array");
    assert_eq!(array.len(), 4);
    assert_eq!(array[0]["created_at"], "2024-01-01T12:00:00+02:00");
    assert_eq!(array[1]["created_at"], "2024-01-02T12:00:00.123456Z");

    // Storage order is kept; only the sort for reads is newest first
    let stored_ids: Vec<i64> = array.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(stored_ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_noop_add_tag_does_not_rewrite_the_file() {
    let (_dir, path, store) = file_store(&seeded_records(3));
    // Hand-written layout the store would never produce
    let compact = serde_json::to_string(&seeded_records(3)).unwrap();
    std::fs::write(&path, &compact).unwrap();

    store.add_tag(1, "health").await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), compact);
}

#[tokio::test]
async fn test_missing_file_degrades_reads() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(JsonFileStorage::new(dir.path().join("absent.json")));

    let page = store.query(&RecordFilter::new().with_limit(5)).await;
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.limit, 5);

    assert!(store.get(1).await.is_none());

    let err = store.add_tag(1, "x").await.unwrap_err();
    assert!(matches!(err, StoreError::StorageUnreadable { .. }));
}

#[tokio::test]
async fn test_corrupt_file_degrades_reads() {
    let (_dir, path, store) = file_store(&seeded_records(3));
    std::fs::write(&path, "{ not json").unwrap();

    let page = store.query(&RecordFilter::new()).await;
    assert_eq!(page.total, 0);
    assert!(store.get(1).await.is_none());
    assert_eq!(store.stats().await, StoreStats::default());

    // The corrupt document is left alone
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_record_without_tags_field_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock-post.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "platform": "Reddit", "text": "hi", "status": "FLAGGED", "created_at": "2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();
    let store = RecordStore::new(JsonFileStorage::new(&path));

    let record = store.get(1).await.unwrap();
    assert!(record.tags.is_empty());

    let record = store.add_tag(1, "new").await.unwrap();
    assert_eq!(record.tags, vec!["new"]);
    assert_eq!(read_document(&path)[0]["tags"], serde_json::json!(["new"]));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unwritable_directory_leaves_file_unchanged() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, path, store) = file_store(&seeded_records(3));
    let before = std::fs::read_to_string(&path).unwrap();

    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();
    let result = store.set_status(1, RecordStatus::Dismissed).await;
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

    // Privileged users can write regardless of mode bits
    if let Err(err) = result {
        assert!(matches!(err, StoreError::StorageUnwritable { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}

#[tokio::test]
async fn test_concurrent_tags_on_file_all_survive() {
    let (_dir, path, store) = file_store(&seeded_records(10));

    let tasks = (1..=10).map(|id| {
        let store = store.clone();
        tokio::spawn(async move { store.add_tag(id, "sweep").await })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let reopened = RecordStore::new(JsonFileStorage::new(&path));
    let page = reopened.query(&RecordFilter::new().with_tag("sweep")).await;
    assert_eq!(page.total, 10);
}
