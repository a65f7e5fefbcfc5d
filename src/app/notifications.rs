use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use tracing::warn;

use crate::domain::notification::{Notification, NotificationKind};
use crate::infra::bus::{EventBus, Topic};
use crate::infra::store::{keys, LocalStore};

struct LogInner {
    entries: Vec<Notification>,
    next_id: u64,
}

/// Durable, append-mostly record of user-facing events, newest-first and
/// independent of the remote service. Every mutation persists the whole
/// sequence (best-effort) and then emits `NotificationsChanged`.
#[derive(Clone)]
pub struct NotificationLog {
    store: LocalStore,
    bus: EventBus,
    inner: Arc<Mutex<LogInner>>,
}

impl NotificationLog {
    /// Load persisted entries, if any. A corrupt blob starts the log empty
    /// rather than failing; the id counter re-seeds above the persisted
    /// maximum so ids keep increasing across reloads.
    pub fn load(store: LocalStore, bus: EventBus) -> Self {
        let entries = match store.get(keys::NOTIFICATIONS) {
            Some(raw) => match serde_json::from_str::<Vec<Notification>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(error = %err, "ignoring corrupt notification log");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let next_id = entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;

        Self {
            store,
            bus,
            inner: Arc::new(Mutex::new(LogInner { entries, next_id })),
        }
    }

    /// Insert a new unread entry at the head, persist, signal.
    pub fn append(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = {
            let mut inner = self.inner.lock().expect("log lock");
            let notification = Notification {
                id: inner.next_id,
                message: message.into(),
                kind,
                created_at: OffsetDateTime::now_utc(),
                read: false,
            };
            inner.next_id += 1;
            inner.entries.insert(0, notification.clone());
            self.persist(&inner.entries);
            notification
        };
        self.bus.emit(Topic::NotificationsChanged);
        notification
    }

    /// Flip one entry's read flag. Returns false for an unknown id.
    pub fn mark_read(&self, id: u64) -> bool {
        let changed = {
            let mut inner = self.inner.lock().expect("log lock");
            let changed = match inner.entries.iter_mut().find(|entry| entry.id == id) {
                Some(entry) => {
                    entry.read = true;
                    true
                }
                None => false,
            };
            if changed {
                self.persist(&inner.entries);
            }
            changed
        };
        if changed {
            self.bus.emit(Topic::NotificationsChanged);
        }
        changed
    }

    pub fn mark_all_read(&self) {
        {
            let mut inner = self.inner.lock().expect("log lock");
            for entry in &mut inner.entries {
                entry.read = true;
            }
            self.persist(&inner.entries);
        }
        self.bus.emit(Topic::NotificationsChanged);
    }

    pub fn clear_all(&self) {
        {
            let mut inner = self.inner.lock().expect("log lock");
            inner.entries.clear();
            self.persist(&inner.entries);
        }
        self.bus.emit(Topic::NotificationsChanged);
    }

    /// Derived, never stored: the count of entries still unread.
    pub fn unread_count(&self) -> usize {
        self.inner
            .lock()
            .expect("log lock")
            .entries
            .iter()
            .filter(|entry| !entry.read)
            .count()
    }

    /// Snapshot, newest-first.
    pub fn entries(&self) -> Vec<Notification> {
        self.inner.lock().expect("log lock").entries.clone()
    }

    fn persist(&self, entries: &[Notification]) {
        match serde_json::to_string(entries) {
            Ok(payload) => self.store.set(keys::NOTIFICATIONS, payload),
            Err(err) => warn!(error = %err, "failed to serialize notification log"),
        }
    }
}
