use crate::domain::post::Author;
use crate::infra::store::{keys, LocalStore};

/// Cached profile display fields. Opaque to the core; the account view
/// edits them and pushes the result to the remote profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub bio: String,
}

/// Read/write access to the persisted credential and profile fields.
/// Token acquisition itself (login, email verification) happens outside
/// the core; this type only stores what that flow hands over.
#[derive(Clone)]
pub struct Session {
    store: LocalStore,
}

impl Session {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(keys::AUTH_TOKEN)
    }

    pub fn sign_in(&self, token: &str, user_id: &str, name: &str) {
        self.store.set(keys::AUTH_TOKEN, token);
        self.store.set(keys::USER_ID, user_id);
        self.store.set(keys::PROFILE_NAME, name);
    }

    pub fn sign_out(&self) {
        self.store.remove(keys::AUTH_TOKEN);
        self.store.remove(keys::USER_ID);
    }

    /// The signed-in user as an author reference, or `None` when either
    /// the credential or the cached identity is missing.
    pub fn current_user(&self) -> Option<Author> {
        self.token()?;
        let id = self.store.get(keys::USER_ID)?;
        let name = self
            .store
            .get(keys::PROFILE_NAME)
            .unwrap_or_else(|| "Unknown User".to_string());
        Some(Author { id, name })
    }

    pub fn pending_verification_email(&self) -> Option<String> {
        self.store.get(keys::PENDING_VERIFICATION_EMAIL)
    }

    pub fn set_pending_verification_email(&self, email: &str) {
        self.store.set(keys::PENDING_VERIFICATION_EMAIL, email);
    }

    pub fn clear_pending_verification_email(&self) {
        self.store.remove(keys::PENDING_VERIFICATION_EMAIL);
    }

    pub fn profile(&self) -> Profile {
        let get = |key| self.store.get(key).unwrap_or_default();
        Profile {
            name: get(keys::PROFILE_NAME),
            dob: get(keys::PROFILE_DOB),
            gender: get(keys::PROFILE_GENDER),
            bio: get(keys::PROFILE_BIO),
        }
    }

    pub fn save_profile(&self, profile: &Profile) {
        self.store.set(keys::PROFILE_NAME, profile.name.clone());
        self.store.set(keys::PROFILE_DOB, profile.dob.clone());
        self.store.set(keys::PROFILE_GENDER, profile.gender.clone());
        self.store.set(keys::PROFILE_BIO, profile.bio.clone());
    }
}
