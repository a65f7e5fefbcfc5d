use std::time::Duration;

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ClientConfig;
use crate::domain::post::{FileAttachment, Like, Post, PostKind};
use crate::error::ClientError;
use crate::infra::session::{Profile, Session};

#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    pub text: String,
    #[serde(rename = "postType")]
    pub kind: PostKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    success: bool,
    #[serde(default)]
    likes: Vec<Like>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    post: Post,
}

/// Typed client for the Remote Post Service. Owns a single HTTP client
/// with the configured timeout; mutating calls carry the bearer credential
/// from the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Validation(format!("invalid endpoint path: {}", err)))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.session.token().ok_or(ClientError::Unauthenticated)?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(ClientError::Transport(format!(
                "server responded with {}",
                status
            )));
        }
        Ok(response)
    }

    /// `GET /api/posts` — the whole public feed, newest-first.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.endpoint("/api/posts")?;
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/posts/my-posts` — the signed-in user's own posts.
    pub async fn fetch_my_posts(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.endpoint("/api/posts/my-posts")?;
        let request = self.authorized(self.http.get(url))?;
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/posts` — create a post, returning the server's record.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ClientError> {
        let url = self.endpoint("/api/posts")?;
        let request = self.authorized(self.http.post(url))?.json(draft);
        let response = self.send(request).await?;
        let created: CreatedResponse = response.json().await?;
        Ok(created.post)
    }

    /// `PUT /api/posts/:id` — replace the text of an existing post.
    pub async fn update_post(&self, post_id: &str, text: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/posts/{}", post_id))?;
        let request = self
            .authorized(self.http.put(url))?
            .json(&serde_json::json!({ "text": text }));
        self.send(request).await?;
        Ok(())
    }

    /// `DELETE /api/posts/:id`
    pub async fn delete_post(&self, post_id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/posts/{}", post_id))?;
        let request = self.authorized(self.http.delete(url))?;
        self.send(request).await?;
        Ok(())
    }

    /// `POST /api/posts/:id/like` — toggle the caller's like server-side;
    /// the response carries the authoritative like set.
    pub async fn toggle_like(&self, post_id: &str) -> Result<Vec<Like>, ClientError> {
        let url = self.endpoint(&format!("/api/posts/{}/like", post_id))?;
        let request = self.authorized(self.http.post(url))?;
        let response = self.send(request).await?;
        let body: LikeResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Transport(
                body.message.unwrap_or_else(|| "like failed".to_string()),
            ));
        }
        Ok(body.likes)
    }

    /// `POST /api/posts/:id/comment`
    pub async fn submit_comment(&self, post_id: &str, text: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/posts/{}/comment", post_id))?;
        let request = self
            .authorized(self.http.post(url))?
            .json(&serde_json::json!({ "text": text }));
        let response = self.send(request).await?;
        let body: AckResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Transport(
                body.message.unwrap_or_else(|| "comment failed".to_string()),
            ));
        }
        Ok(())
    }

    /// `PUT /api/user/profile` — push the cached profile display fields.
    pub async fn save_profile(&self, profile: &Profile) -> Result<(), ClientError> {
        let url = self.endpoint("/api/user/profile")?;
        let request = self.authorized(self.http.put(url))?.json(&serde_json::json!({
            "name": profile.name,
            "dob": profile.dob,
            "gender": profile.gender,
            "bio": profile.bio,
        }));
        self.send(request).await?;
        Ok(())
    }
}
