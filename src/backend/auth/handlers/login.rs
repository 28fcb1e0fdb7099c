/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Require username and password
 * 2. Find the user whose username and password both match
 * 3. Issue a `userId-timestamp` token and activate it
 * 4. Return token and user info
 *
 * Invalid credentials return 401 without saying which part was wrong.
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::users::find_user_by_username;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::api::SessionUser;
use crate::shared::error::require;

const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If username or password is missing
/// * `401 Unauthorized` - If no user matches the credentials
///
/// # Example Response
///
/// ```json
/// {
///   "token": "1718000000000-1718000123456",
///   "user": {
///     "id": "1718000000000",
///     "username": "alice",
///     "email": "alice@example.com",
///     "avatar": "https://api.dicebear.com/7.x/avataaars/svg?seed=alice",
///     "isAdmin": false
///   }
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let username = require("username", request.username.as_deref(), MISSING_CREDENTIALS)?;
    let password = require("password", request.password.as_deref(), MISSING_CREDENTIALS)?;

    let user = find_user_by_username(&app_state.store, username)
        .await?
        .filter(|user| user.password == password)
        .ok_or_else(|| {
            tracing::warn!("Failed login for {}", username);
            BackendError::handler(
                axum::http::StatusCode::UNAUTHORIZED,
                "Invalid username or password",
            )
        })?;

    let token = app_state.tokens.issue(&user.id);
    tracing::info!("User logged in: {} ({})", user.username, user.id);

    Ok(Json(LoginResponse {
        token,
        user: SessionUser::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::testing::{add_user, test_state};
    use axum::http::StatusCode;

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let (_dir, state) = test_state().await;
        let user = add_user(&state, "alice").await;

        let Json(body) = login(State(state.clone()), ApiJson(request("alice", "pw")))
            .await
            .unwrap();
        assert!(body.token.starts_with(&format!("{}-", user.id)));
        assert!(state.tokens.contains(&body.token));
        assert_eq!(body.user.username, "alice");
        assert!(!body.user.is_admin);
    }

    #[tokio::test]
    async fn test_login_seeded_admin() {
        let (_dir, state) = test_state().await;
        let Json(body) = login(State(state), ApiJson(request("ab", "ab"))).await.unwrap();
        assert_eq!(body.user.id, "admin");
        assert!(body.user.is_admin);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let (_dir, state) = test_state().await;
        add_user(&state, "alice").await;
        let err = login(State(state.clone()), ApiJson(request("alice", "wrong")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(state.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (_dir, state) = test_state().await;
        let err = login(State(state), ApiJson(LoginRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
