//! Integration tests for the record stores.

use roster::{
    FeedbackStore, NewFeedback, NewSubscriber, RecordId, RecordStore, ServiceConfig,
    SubscriberStore, UniqueKeyStore,
};
use std::fs;
use tempfile::TempDir;

fn test_store(dir: &TempDir) -> SubscriberStore {
    SubscriberStore::open(&ServiceConfig {
        data_dir: dir.path().join("data"),
        ..Default::default()
    })
    .unwrap()
}

// --- Subscribers ---

#[test]
fn test_subscriber_signup_scenario() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let a = store.create(NewSubscriber::new("a@x.com")).unwrap();
    assert_eq!((a.id, a.email.as_str()), (RecordId(1), "a@x.com"));

    // Same email again: the existing record comes back, not id 2
    let again = store.create(NewSubscriber::new("a@x.com")).unwrap();
    assert_eq!(again, a);

    let b = store.create(NewSubscriber::new("b@x.com")).unwrap();
    assert_eq!((b.id, b.email.as_str()), (RecordId(2), "b@x.com"));

    let all = store.list_all();
    assert_eq!(all, vec![a, b]);
}

#[test]
fn test_duplicate_create_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.create(NewSubscriber::new("a@x.com")).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    store.create(NewSubscriber::new("a@x.com")).unwrap();
    let after = fs::read_to_string(store.path()).unwrap();

    assert_eq!(before, after);
    assert_eq!(after.lines().count(), 1);
}

#[test]
fn test_read_after_write() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    store.create(NewSubscriber::new("first@x.com")).unwrap();
    let created = store.create(NewSubscriber::new("second@x.com")).unwrap();

    assert_eq!(store.get_by_unique_key("second@x.com"), Some(created.clone()));
    assert_eq!(store.get_by_id(created.id), Some(created));
    assert_eq!(store.get_by_id(RecordId(3)), None);
    assert_eq!(store.get_by_email("missing@x.com"), None);
}

#[test]
fn test_subscribers_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let created = {
        let store = test_store(&dir);
        store.create(NewSubscriber::new("a@x.com")).unwrap();
        store.create(NewSubscriber::new("b@x.com")).unwrap()
    };

    let store = test_store(&dir);
    assert_eq!(store.count(), 2);
    assert_eq!(store.get_by_email("b@x.com"), Some(created));

    let c = store.create(NewSubscriber::new("c@x.com")).unwrap();
    assert_eq!(c.id, RecordId(3));
}

#[test]
fn test_log_format_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let a = store.create(NewSubscriber::new("a@x.com")).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, format!("a@x.com,{}\n", a.created_at));
}

#[test]
fn test_manually_seeded_log() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("subscribers.txt"),
        "x@x.com,2024-01-01T00:00:00.000Z\n\ny@x.com,2024-01-02T00:00:00.000Z\n",
    )
    .unwrap();

    let store = test_store(&dir);
    let y = store.get_by_email("y@x.com").unwrap();
    assert_eq!(y.id, RecordId(2));
    assert_eq!(y.created_at.to_string(), "2024-01-02T00:00:00.000Z");
}

// --- Feedback ---

#[test]
fn test_feedback_scenario() {
    let store = FeedbackStore::new();

    let first = store
        .create(NewFeedback::new("A", "a@x.com", "bug", "m"))
        .unwrap();
    store
        .create(NewFeedback::new("B", "b@x.com", "idea", "n"))
        .unwrap();

    assert_eq!(store.list_by_category("bug"), vec![first]);

    store.clear_all();
    assert!(store.list_all().is_empty());

    let next = store
        .create(NewFeedback::new("C", "c@x.com", "bug", "o"))
        .unwrap();
    assert_eq!(next.id, RecordId(3));
}

#[test]
fn test_feedback_list_in_insertion_order() {
    let store = FeedbackStore::new();
    for i in 0..10 {
        let category = if i % 3 == 0 { "bug" } else { "other" };
        store
            .create(NewFeedback::new(format!("n{}", i), "a@x.com", category, "m"))
            .unwrap();
    }

    let ids: Vec<u64> = store.list_all().iter().map(|f| f.id.0).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let bug_ids: Vec<u64> = store.list_by_category("bug").iter().map(|f| f.id.0).collect();
    assert_eq!(bug_ids, vec![1, 4, 7, 10]);
}

#[test]
fn test_feedback_instances_are_independent() {
    let one = FeedbackStore::new();
    let two = FeedbackStore::new();

    one.create(NewFeedback::new("A", "a@x.com", "bug", "m")).unwrap();
    let other = two.create(NewFeedback::new("B", "b@x.com", "bug", "m")).unwrap();

    assert_eq!(other.id, RecordId(1));
    assert_eq!(one.len(), 1);
}
