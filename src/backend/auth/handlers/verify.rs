/**
 * Verify Token Handler
 *
 * This module implements POST /api/auth/verify-token, which a client calls
 * after a server restart to re-activate the token it has stored.
 *
 * The token is only checked for shape (`userId-timestamp`, i.e. containing
 * a `-`); a well-formed token is added to the active set. A token restored
 * this way is not accepted on admin routes until the admin logs in again.
 */
use axum::{extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::handlers::types::VerifyResponse;
use crate::backend::auth::tokens::TokenRegistry;
use crate::backend::auth::users::find_user;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::bearer_token;
use crate::backend::server::state::AppState;
use crate::shared::api::SessionUser;

/// Verify-token handler
///
/// # Errors
///
/// * `400 Bad Request` - If no bearer token is present
/// * `401 Unauthorized` - If the token is not of the form `userId-timestamp`
pub async fn verify_token(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<VerifyResponse>> {
    let token = bearer_token(&headers).ok_or_else(|| BackendError::bad_request("No token"))?;

    let user_id = TokenRegistry::user_id_of(token).ok_or_else(|| {
        BackendError::handler(axum::http::StatusCode::UNAUTHORIZED, "Invalid token format")
    })?;

    app_state.tokens.restore(token);
    let user = find_user(&app_state.store, user_id).await?;
    tracing::debug!("Re-activated token for {}", user_id);

    Ok(Json(VerifyResponse {
        valid: true,
        user: user.as_ref().map(SessionUser::from),
    }))
}
