/**
 * Post Likes
 *
 * - `POST /api/posts/{id}/like` - like a post once; notifies the author
 * - `DELETE /api/posts/{id}/like` - remove the caller's like
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
use crate::shared::models::{Like, NotificationKind, Post, RecordId};

/// Look up a post or fail with 404
pub(crate) async fn existing_post(app_state: &AppState, id: RecordId) -> ApiResult<Post> {
    let posts: Vec<Post> = app_state.store.load().await?;
    posts
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| BackendError::not_found("Post not found"))
}

/// Like a post
///
/// # Errors
///
/// * `404 Not Found` - If the post does not exist
/// * `400 Bad Request` - If the caller already liked it
pub async fn like_post(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<MessageResponse>> {
    let post = existing_post(&app_state, id).await?;

    let like_id = app_state.ids.next_id();
    app_state
        .store
        .update(|likes: &mut Vec<Like>| {
            if likes
                .iter()
                .any(|l| l.post_id == id && l.user_id == caller.user_id)
            {
                return Err(BackendError::bad_request("Already liked"));
            }
            likes.push(Like {
                id: like_id,
                post_id: id,
                user_id: caller.user_id.clone(),
                created_at: Utc::now(),
            });
            Ok(())
        })
        .await?;

    if post.author_id != caller.user_id {
        let who = actor_name(&app_state, &caller.user_id).await;
        notify(
            &app_state,
            &post.author_id,
            NotificationKind::Like,
            format!("{} liked your post \"{}\"", who, post.title),
        )
        .await;
    }

    Ok(Json(MessageResponse::new("Liked")))
}

/// Remove the caller's like
///
/// # Errors
///
/// * `404 Not Found` - If the caller has not liked the post
pub async fn unlike_post(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<MessageResponse>> {
    app_state
        .store
        .update(|likes: &mut Vec<Like>| {
            let index = likes
                .iter()
                .position(|l| l.post_id == id && l.user_id == caller.user_id)
                .ok_or_else(|| BackendError::not_found("Not liked"))?;
            likes.remove(index);
            Ok::<_, BackendError>(())
        })
        .await?;

    Ok(Json(MessageResponse::new("Like removed")))
}
