/**
 * Follow Handlers
 *
 * - `POST /api/follow/{userId}` - follow a user; notifies them
 * - `DELETE /api/follow/{userId}` - stop following a user
 *
 * The target id is not checked against `users.json`.
 */
use axum::{
    extract::State,
    response::Json,
};
use chrono::Utc;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiPath, AuthUser};
use crate::backend::notifications::{actor_name, notify};
use crate::backend::server::state::AppState;
use crate::shared::api::MessageResponse;
use crate::shared::models::{Follow, NotificationKind, UserId};

/// Follow a user
///
/// # Errors
///
/// * `400 Bad Request` - If the caller targets themselves or already follows the user
pub async fn follow_user(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(target): ApiPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    if target == caller.user_id {
        return Err(BackendError::bad_request("Cannot follow yourself"));
    }

    let follow_id = app_state.ids.next_id();
    app_state
        .store
        .update(|follows: &mut Vec<Follow>| {
            if follows
                .iter()
                .any(|f| f.follower_id == caller.user_id && f.following_id == target)
            {
                return Err(BackendError::bad_request("Already following this user"));
            }
            follows.push(Follow {
                id: follow_id,
                follower_id: caller.user_id.clone(),
                following_id: target.clone(),
                created_at: Utc::now(),
            });
            Ok(())
        })
        .await?;

    tracing::info!("{} now follows {}", caller.user_id, target);
    let who = actor_name(&app_state, &caller.user_id).await;
    notify(
        &app_state,
        &target,
        NotificationKind::Follow,
        format!("{} started following you", who),
    )
    .await;

    Ok(Json(MessageResponse::new("Followed")))
}

/// Stop following a user
///
/// # Errors
///
/// * `404 Not Found` - If the caller does not follow the user
pub async fn unfollow_user(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(target): ApiPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    app_state
        .store
        .update(|follows: &mut Vec<Follow>| {
            let index = follows
                .iter()
                .position(|f| f.follower_id == caller.user_id && f.following_id == target)
                .ok_or_else(|| BackendError::not_found("Not following this user"))?;
            follows.remove(index);
            Ok::<_, BackendError>(())
        })
        .await?;

    tracing::info!("{} unfollowed {}", caller.user_id, target);
    Ok(Json(MessageResponse::new("Unfollowed")))
}
