use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::warn;

/// Keys the rest of the client persists under. Blobs are opaque strings;
/// there are no transactional guarantees across keys.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_ID: &str = "userId";
    pub const USER_EMAIL: &str = "userEmail";
    pub const PROFILE_NAME: &str = "profileName";
    pub const PROFILE_DOB: &str = "profileDob";
    pub const PROFILE_GENDER: &str = "profileGender";
    pub const PROFILE_BIO: &str = "profileBio";
    pub const PENDING_VERIFICATION_EMAIL: &str = "pendingVerificationEmail";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Local key-value storage, the browser-localStorage analogue. Reads and
/// writes hit the in-memory map; the backing file is best-effort only, so
/// a failed flush costs durability across restarts, never correctness.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
    path: Option<PathBuf>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Open a store backed by `path`. An unreadable or corrupt file starts
    /// the store empty rather than failing.
    pub fn open(path: PathBuf) -> Self {
        let map = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring corrupt local store");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            inner: Arc::new(RwLock::new(map)),
            path: Some(path),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.read().expect("store lock").get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.inner
            .write()
            .expect("store lock")
            .insert(key.to_string(), value.into());
        self.flush();
    }

    pub fn remove(&self, key: &str) {
        self.inner.write().expect("store lock").remove(key);
        self.flush();
    }

    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let snapshot = self.inner.read().expect("store lock").clone();
        match serde_json::to_string(&snapshot) {
            Ok(payload) => {
                if let Err(err) = std::fs::write(path, payload) {
                    warn!(path = %path.display(), error = %err, "failed to persist local store");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize local store");
            }
        }
    }
}
