pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use crate::app::feed::FeedMirror;
use crate::app::likes::LikeCoordinator;
use crate::app::notifications::NotificationLog;
use crate::app::posts::PostComposer;
use crate::config::ClientConfig;
use crate::infra::api::ApiClient;
use crate::infra::bus::EventBus;
use crate::infra::session::Session;
use crate::infra::store::LocalStore;

/// All the cloneable handles a view needs, wired against one store, one
/// bus, and one mirror so every mounted view sees the same shared state.
#[derive(Clone)]
pub struct Client {
    pub store: LocalStore,
    pub session: Session,
    pub bus: EventBus,
    pub api: ApiClient,
    pub mirror: FeedMirror,
    pub likes: LikeCoordinator,
    pub composer: PostComposer,
    pub notifications: NotificationLog,
}

impl Client {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let store = match &config.storage_path {
            Some(path) => LocalStore::open(path.clone()),
            None => LocalStore::in_memory(),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: &ClientConfig, store: LocalStore) -> anyhow::Result<Self> {
        let session = Session::new(store.clone());
        let bus = EventBus::new();
        let api = ApiClient::new(config, session.clone())?;
        let mirror = FeedMirror::new(api.clone());
        let notifications = NotificationLog::load(store.clone(), bus.clone());
        let likes = LikeCoordinator::new(
            api.clone(),
            mirror.clone(),
            bus.clone(),
            session.clone(),
        );
        let composer = PostComposer::new(
            api.clone(),
            mirror.clone(),
            bus.clone(),
            notifications.clone(),
            session.clone(),
        );

        Ok(Self {
            store,
            session,
            bus,
            api,
            mirror,
            likes,
            composer,
            notifications,
        })
    }

    /// Persist edited profile display fields locally, then push them to
    /// the remote profile endpoint when a credential is present. The local
    /// cache is updated either way, matching the best-effort contract of
    /// the store.
    pub async fn save_profile(
        &self,
        profile: &infra::session::Profile,
    ) -> Result<(), error::ClientError> {
        self.session.save_profile(profile);
        if self.session.token().is_some() {
            self.api.save_profile(profile).await?;
        }
        Ok(())
    }
}
