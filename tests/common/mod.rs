#![allow(dead_code)]

use serde_json::{json, Value};
use url::Url;
use wiremock::MockServer;

use brume::config::ClientConfig;
use brume::infra::store::LocalStore;
use brume::Client;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER_ID: &str = "u1";
pub const TEST_USER_NAME: &str = "Test User";

// ---------------------------------------------------------------------------
// TestClient — a fresh mock server and client per test
// ---------------------------------------------------------------------------

pub struct TestClient {
    pub server: MockServer,
    pub client: Client,
}

pub async fn start() -> TestClient {
    let server = MockServer::start().await;
    let client = client_for(&server.uri());
    TestClient { server, client }
}

/// A client wired against `base_url` with an in-memory store.
pub fn client_for(base_url: &str) -> Client {
    let config = ClientConfig {
        api_base_url: Url::parse(base_url).expect("mock server uri"),
        http_timeout_seconds: 5,
        page_size: 2,
        storage_path: None,
    };
    Client::with_store(&config, LocalStore::in_memory()).expect("client wiring")
}

impl TestClient {
    pub fn sign_in(&self) {
        self.client
            .session
            .sign_in(TEST_TOKEN, TEST_USER_ID, TEST_USER_NAME);
    }
}

// ---------------------------------------------------------------------------
// Wire-shape builders
// ---------------------------------------------------------------------------

pub fn post_json(id: &str, likes: Value) -> Value {
    json!({
        "_id": id,
        "user": { "_id": "author-1", "name": "Afsana Mim" },
        "postType": "text",
        "text": "Conference registration open now!",
        "likes": likes,
        "comments": [],
        "createdAt": "2026-08-01T10:00:00Z"
    })
}

pub fn like_of(user_id: &str) -> Value {
    json!({ "user": user_id })
}

pub fn like_response(likes: Value) -> Value {
    json!({ "success": true, "likes": likes })
}
