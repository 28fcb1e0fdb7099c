//! Logout handler for POST /api/auth/logout.

use axum::{extract::State, response::Json};

use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::api::MessageResponse;

/// Revoke the caller's token
///
/// Other tokens of the same user stay active.
pub async fn logout(State(app_state): State<AppState>, caller: AuthUser) -> Json<MessageResponse> {
    app_state.tokens.revoke(&caller.token);
    tracing::info!("User {} logged out", caller.user_id);
    Json(MessageResponse::new("Logged out"))
}
