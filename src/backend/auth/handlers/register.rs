/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Require username and password
 * 2. Reject a username that is already taken
 * 3. Append the user to `users.json`
 * 4. Return the new account (no token; the client logs in next)
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::users::{create_user, NewUser};
use crate::backend::error::ApiResult;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::error::require;

const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If username or password is missing, or the username is taken
/// * `500 Internal Server Error` - If `users.json` cannot be written
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "secret", "email": "alice@example.com"}
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let username = require("username", request.username.as_deref(), MISSING_CREDENTIALS)?;
    let password = require("password", request.password.as_deref(), MISSING_CREDENTIALS)?;

    let user = create_user(
        &app_state.store,
        &app_state.ids,
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
            email: request.email.unwrap_or_default(),
            avatar: request.avatar,
        },
    )
    .await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            message: "Registration successful".to_string(),
        }),
    ))
}
