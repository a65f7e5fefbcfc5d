use tracing::{info, warn};

use crate::app::feed::FeedMirror;
use crate::app::notifications::NotificationLog;
use crate::domain::notification::NotificationKind;
use crate::domain::post::{Post, PostKind};
use crate::error::ClientError;
use crate::infra::api::{ApiClient, PostDraft};
use crate::infra::bus::{EventBus, Topic};
use crate::infra::session::Session;

/// Inline images travel as data URLs; cap them before dispatch the same
/// way the profile uploads are capped.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Non-optimistic mutations: create, comment, edit, delete, share. Each
/// networked action is sent first and only a success refreshes the mirror
/// and signals the other views — no local prediction of post or comment
/// lists is attempted.
#[derive(Clone)]
pub struct PostComposer {
    api: ApiClient,
    mirror: FeedMirror,
    bus: EventBus,
    notifications: NotificationLog,
    session: Session,
}

impl PostComposer {
    pub fn new(
        api: ApiClient,
        mirror: FeedMirror,
        bus: EventBus,
        notifications: NotificationLog,
        session: Session,
    ) -> Self {
        Self {
            api,
            mirror,
            bus,
            notifications,
            session,
        }
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, ClientError> {
        self.session
            .token()
            .ok_or(ClientError::Unauthenticated)?;
        validate_draft(&draft)?;

        let post = self.api.create_post(&draft).await?;
        info!(post_id = %post.id, "post created");

        let message = match (&draft.kind, &draft.file) {
            (PostKind::Image, _) => "📸 You shared a new photo".to_string(),
            (PostKind::File, Some(file)) => format!("📎 You shared a new file: {}", file.name),
            _ => "📝 You created a new post".to_string(),
        };
        self.notifications.append(message, NotificationKind::Success);

        // The post exists server-side from here on; a failed follow-up
        // fetch must not suppress the change signal.
        if let Err(err) = self.mirror.refresh().await {
            warn!(error = %err, "feed refresh after create failed");
        }
        self.bus.emit(Topic::PostsChanged);
        Ok(post)
    }

    pub async fn comment(&self, post_id: &str, text: &str) -> Result<(), ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::validation("please write a comment"));
        }
        self.session
            .token()
            .ok_or(ClientError::Unauthenticated)?;

        self.api.submit_comment(post_id, text).await?;
        self.mirror.refresh().await?;
        self.bus.emit(Topic::PostsChanged);
        Ok(())
    }

    pub async fn edit(&self, post_id: &str, text: &str) -> Result<(), ClientError> {
        self.session
            .token()
            .ok_or(ClientError::Unauthenticated)?;
        self.api.update_post(post_id, text).await?;
        self.mirror.refresh().await?;
        self.bus.emit(Topic::PostsChanged);
        Ok(())
    }

    /// Delete removes the post from the mirror as well as signalling the
    /// remote service; no refresh round-trip is needed for the local view.
    pub async fn delete(&self, post_id: &str) -> Result<(), ClientError> {
        self.session
            .token()
            .ok_or(ClientError::Unauthenticated)?;
        self.api.delete_post(post_id).await?;
        self.mirror.remove(post_id);
        self.bus.emit(Topic::PostsChanged);
        Ok(())
    }

    /// Share is local-only: it records a notification for the badge and
    /// the notification panel. The actual link handoff (system share
    /// sheet, clipboard) is a rendering concern.
    pub fn share(&self, post_id: &str) -> Result<(), ClientError> {
        let post = self
            .mirror
            .find_by_id(post_id)
            .ok_or_else(|| ClientError::validation("unknown post"))?;
        self.notifications.append(
            format!("🔗 You shared a post by {}", post.user.name),
            NotificationKind::Share,
        );
        Ok(())
    }
}

fn validate_draft(draft: &PostDraft) -> Result<(), ClientError> {
    match draft.kind {
        PostKind::Text => {
            if draft.text.trim().is_empty() {
                return Err(ClientError::validation("please write something for your post"));
            }
        }
        PostKind::Image => match &draft.image {
            None => return Err(ClientError::validation("please choose an image")),
            Some(image) if image.len() > MAX_IMAGE_BYTES => {
                return Err(ClientError::validation("image is too large"));
            }
            Some(_) => {}
        },
        PostKind::File => {
            if draft.file.is_none() {
                return Err(ClientError::validation("please choose a file"));
            }
        }
    }
    Ok(())
}
