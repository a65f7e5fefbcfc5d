use std::sync::{Arc, RwLock};

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::post::{Author, Like, Post, PostKind};
use crate::error::ClientError;
use crate::infra::api::ApiClient;

/// The local mirror of the remote post collection: one authoritative
/// in-memory table, newest-first, shared by handle among every mounted
/// view. `refresh()` replaces the whole sequence; renderers never mutate
/// it directly — all mutation goes through the like coordinator, the
/// composer, or a refresh.
#[derive(Clone)]
pub struct FeedMirror {
    api: ApiClient,
    posts: Arc<RwLock<Vec<Post>>>,
}

impl FeedMirror {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            posts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Re-fetch the canonical collection and replace the mirror wholesale.
    /// On failure the mirror is left unchanged, except that a transport
    /// failure against an empty mirror substitutes a single placeholder
    /// post so the view is never empty.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        match self.api.fetch_posts().await {
            Ok(posts) => {
                debug!(count = posts.len(), "feed mirror refreshed");
                *self.posts.write().expect("mirror lock") = posts;
                Ok(())
            }
            Err(err @ ClientError::Transport(_)) => {
                let mut posts = self.posts.write().expect("mirror lock");
                if posts.is_empty() {
                    warn!(error = %err, "feed fetch failed, substituting placeholder");
                    posts.push(Self::placeholder_post());
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn find_by_id(&self, post_id: &str) -> Option<Post> {
        self.posts
            .read()
            .expect("mirror lock")
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
    }

    /// Snapshot of the whole sequence, newest-first.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.read().expect("mirror lock").clone()
    }

    pub fn len(&self) -> usize {
        self.posts.read().expect("mirror lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().expect("mirror lock").is_empty()
    }

    /// Replace one post's like set. Returns false when the post has left
    /// the mirror (deleted, or dropped by a racing refresh).
    pub(crate) fn set_likes(&self, post_id: &str, likes: Vec<Like>) -> bool {
        let mut posts = self.posts.write().expect("mirror lock");
        match posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => {
                post.likes = likes;
                true
            }
            None => false,
        }
    }

    /// Flip `user_id`'s membership in a post's like set and return the new
    /// membership, or `None` for an unknown post. This is the optimistic
    /// prediction, later replaced by authoritative data or rolled back.
    pub(crate) fn flip_like(&self, post_id: &str, user_id: &str) -> Option<bool> {
        let mut posts = self.posts.write().expect("mirror lock");
        let post = posts.iter_mut().find(|post| post.id == post_id)?;
        if post.liked_by(user_id) {
            post.likes.retain(|like| like.user_id() != user_id);
            Some(false)
        } else {
            post.likes.push(Like::from_user_id(user_id));
            Some(true)
        }
    }

    pub(crate) fn remove(&self, post_id: &str) {
        self.posts
            .write()
            .expect("mirror lock")
            .retain(|post| post.id != post_id);
    }

    fn placeholder_post() -> Post {
        Post {
            id: "placeholder".to_string(),
            user: Author {
                id: "system".to_string(),
                name: "Research Gate".to_string(),
            },
            kind: PostKind::Text,
            text: Some("We can't reach the server right now. Pull to refresh.".to_string()),
            image: None,
            file: None,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
