//! Common test utilities and helpers
//!
//! Every test gets its own data directory and a full router served through
//! `axum-test`, so tests can run in parallel.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use socialhub::backend::routes::create_router;
use socialhub::backend::server::{build_state, AppState, ServerConfig};
use tempfile::TempDir;

/// Admin credentials used by every test app
pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "secret";

/// A running app over a temporary data directory
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub dir: TempDir,
}

/// A logged-in test user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig::builder()
        .data_dir(dir.path().join("db"))
        .static_dir(dir.path().join("public"))
        .admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .build()
        .unwrap()
}

impl TestApp {
    /// App served in-process, for REST tests
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let state = build_state(test_config(&dir)).await.unwrap();
        let server = TestServer::new(create_router(state.clone())).unwrap();
        Self { server, state, dir }
    }

    /// App over a data directory pre-populated with collection files
    ///
    /// `files` are `(file name, contents)` pairs written before startup, for
    /// data left behind by earlier deployments.
    pub async fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("db");
        std::fs::create_dir_all(&db).unwrap();
        for (name, contents) in files {
            std::fs::write(db.join(name), contents).unwrap();
        }
        let state = build_state(test_config(&dir)).await.unwrap();
        let server = TestServer::new(create_router(state.clone())).unwrap();
        Self { server, state, dir }
    }

    /// Contents of a collection file in the data directory
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join("db").join(name)).unwrap()
    }

    /// App served over a real HTTP transport, required for WebSocket tests
    pub async fn with_http_transport() -> Self {
        let dir = TempDir::new().unwrap();
        let state = build_state(test_config(&dir)).await.unwrap();
        let server = TestServer::builder()
            .http_transport()
            .build(create_router(state.clone()))
            .unwrap();
        Self { server, state, dir }
    }

    /// Register `username` (password `"pw"`) and log in
    pub async fn user(&self, username: &str) -> TestUser {
        self.server
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "password": "pw",
                "email": format!("{}@example.com", username),
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        self.login(username, "pw").await
    }

    /// Log in and return the session
    pub async fn login(&self, username: &str, password: &str) -> TestUser {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            username: username.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Log in as the seeded admin
    pub async fn admin(&self) -> TestUser {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a post as `user` and return its JSON
    pub async fn post_as(&self, user: &TestUser, title: &str) -> Value {
        let response = self
            .server
            .post("/api/posts")
            .authorization_bearer(&user.token)
            .json(&json!({ "title": title, "content": "body", "author": user.username }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    /// Make `follower` follow `target`
    pub async fn follow(&self, follower: &TestUser, target: &TestUser) {
        self.server
            .post(&format!("/api/follow/{}", target.id))
            .authorization_bearer(&follower.token)
            .await
            .assert_status_ok();
    }
}
