//! Handler test fixtures: a fresh data directory and helpers to create
//! users and sessions without going through HTTP.

use tempfile::TempDir;

use crate::backend::auth::users::{create_user, NewUser};
use crate::backend::middleware::AuthUser;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::init::build_state;
use crate::backend::server::state::AppState;
use crate::shared::models::User;

/// State backed by a temporary data directory
///
/// Keep the `TempDir` alive for the duration of the test.
pub(crate) async fn test_state() -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::builder()
        .data_dir(dir.path().join("db"))
        .static_dir(dir.path().join("public"))
        .build()
        .unwrap();
    let state = build_state(config).await.unwrap();
    (dir, state)
}

/// Register `username` and return the record
pub(crate) async fn add_user(state: &AppState, username: &str) -> User {
    create_user(
        &state.store,
        &state.ids,
        NewUser {
            username: username.to_string(),
            password: "pw".to_string(),
            email: format!("{}@example.com", username),
            avatar: None,
        },
    )
    .await
    .unwrap()
}

/// Issue a token for `user` and return the matching extractor value
pub(crate) fn session(state: &AppState, user: &User) -> AuthUser {
    AuthUser {
        user_id: user.id.clone(),
        token: state.tokens.issue(&user.id),
    }
}
