//! Notification Log Tests
//!
//! Covers newest-first ordering, the derived unread count, bulk
//! operations, persistence across reloads, and the signal contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use brume::app::notifications::NotificationLog;
use brume::domain::notification::NotificationKind;
use brume::infra::bus::{EventBus, Topic};
use brume::infra::store::LocalStore;

fn log() -> NotificationLog {
    NotificationLog::load(LocalStore::in_memory(), EventBus::new())
}

#[tokio::test]
async fn append_then_mark_all_read() {
    let log = log();
    assert_eq!(log.unread_count(), 0);

    log.append("📝 new post", NotificationKind::Success);
    assert_eq!(log.unread_count(), 1);

    log.mark_all_read();
    assert_eq!(log.unread_count(), 0);
}

#[tokio::test]
async fn entries_are_newest_first() {
    let log = log();
    log.append("first", NotificationKind::Info);
    log.append("second", NotificationKind::Info);
    log.append("third", NotificationKind::Share);

    let entries = log.entries();
    assert_eq!(entries[0].message, "third");
    assert_eq!(entries[2].message, "first");
    for pair in entries.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
        assert!(pair[0].id > pair[1].id);
    }
}

#[tokio::test]
async fn unread_count_is_derived_across_every_operation() {
    let log = log();
    let a = log.append("a", NotificationKind::Info);
    log.append("b", NotificationKind::Info);
    log.append("c", NotificationKind::Info);
    assert_eq!(log.unread_count(), 3);

    assert!(log.mark_read(a.id));
    assert_eq!(log.unread_count(), 2);

    // Marking the same entry again, or an unknown id, changes nothing.
    assert!(log.mark_read(a.id));
    assert_eq!(log.unread_count(), 2);
    assert!(!log.mark_read(9999));
    assert_eq!(log.unread_count(), 2);

    log.mark_all_read();
    assert_eq!(log.unread_count(), 0);

    log.append("d", NotificationKind::Success);
    assert_eq!(log.unread_count(), 1);

    log.clear_all();
    assert_eq!(log.unread_count(), 0);
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn log_survives_a_reload_and_ids_keep_increasing() {
    let store = LocalStore::in_memory();
    let first = NotificationLog::load(store.clone(), EventBus::new());
    first.append("kept", NotificationKind::Info);
    let last = first.append("also kept", NotificationKind::Info);
    first.mark_read(last.id);

    let reloaded = NotificationLog::load(store, EventBus::new());
    let entries = reloaded.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "also kept");
    assert!(entries[0].read);
    assert_eq!(reloaded.unread_count(), 1);

    let fresh = reloaded.append("new", NotificationKind::Info);
    assert!(fresh.id > last.id);
}

#[tokio::test]
async fn every_mutation_emits_notifications_changed() {
    let bus = EventBus::new();
    let log = NotificationLog::load(LocalStore::in_memory(), bus.clone());

    let hits = Arc::new(AtomicUsize::new(0));
    let _sub = {
        let hits = hits.clone();
        bus.subscribe(Topic::NotificationsChanged, move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };

    let entry = log.append("hello", NotificationKind::Info);
    log.mark_read(entry.id);
    log.mark_all_read();
    log.clear_all();
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn unwritable_backing_file_does_not_fail_operations() {
    // Persistence is best-effort: the flush warns and the in-memory state
    // still advances.
    let store = LocalStore::open("/definitely/missing/dir/brume-store.json".into());
    let log = NotificationLog::load(store, EventBus::new());

    log.append("still works", NotificationKind::Info);
    assert_eq!(log.unread_count(), 1);
    assert_eq!(log.entries()[0].message, "still works");
}
