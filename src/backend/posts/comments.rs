/**
 * Comments
 *
 * - `POST /api/posts/{id}/comments` - comment on a post
 * - `GET /api/posts/{id}/comments` - comments on a post, oldest first
 * - `DELETE /api/comments/{id}` - delete a comment (commenter only)
 *
 * New and deleted comments are broadcast to the post subscribers as
 * `comment-update` frames.
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use crate::backend::auth::users::find_user;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::notifications::notify;
use crate::backend::posts::likes::existing_post;
use crate::backend::posts::types::CreateCommentRequest;
use crate::backend::realtime::broadcast_comment_update;
use crate::backend::server::state::AppState;
use crate::shared::event::UpdateAction;
use crate::shared::models::{Comment, NotificationKind, RecordId};

/// Comment on a post
///
/// `username` and `avatar` default to the commenter's current profile.
///
/// # Errors
///
/// * `404 Not Found` - If the post does not exist
pub async fn create_comment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(post_id): ApiPath<RecordId>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let post = existing_post(&app_state, post_id).await?;
    let commenter = find_user(&app_state.store, &caller.user_id).await?;

    let username = request
        .username
        .filter(|u| !u.is_empty())
        .or_else(|| commenter.as_ref().map(|u| u.username.clone()))
        .unwrap_or_default();
    let avatar = request
        .avatar
        .filter(|a| !a.is_empty())
        .or_else(|| commenter.as_ref().map(|u| u.avatar.clone()))
        .unwrap_or_default();

    let comment = Comment {
        id: app_state.ids.next_id(),
        post_id,
        user_id: caller.user_id.clone(),
        content: request.content,
        username,
        avatar,
        created_at: Utc::now(),
    };

    app_state
        .store
        .update(|comments: &mut Vec<Comment>| {
            comments.push(comment.clone());
            Ok::<_, BackendError>(())
        })
        .await?;

    broadcast_comment_update(&app_state.connections, UpdateAction::Add, &comment);

    if post.author_id != caller.user_id {
        let who = if comment.username.is_empty() {
            "Someone"
        } else {
            comment.username.as_str()
        };
        notify(
            &app_state,
            &post.author_id,
            NotificationKind::Comment,
            format!("{} commented on your post \"{}\"", who, post.title),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Comments on a post, oldest first
pub async fn list_comments(
    State(app_state): State<AppState>,
    _caller: AuthUser,
    ApiPath(post_id): ApiPath<RecordId>,
) -> ApiResult<Json<Vec<Comment>>> {
    let comments: Vec<Comment> = app_state.store.load().await?;
    let mut on_post: Vec<Comment> = comments
        .into_iter()
        .filter(|c| c.post_id == post_id)
        .collect();
    on_post.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    Ok(Json(on_post))
}

/// Delete a comment
///
/// # Errors
///
/// * `404 Not Found` - If the comment does not exist
/// * `403 Forbidden` - If the caller did not write it
pub async fn delete_comment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<Comment>> {
    let deleted = app_state
        .store
        .update(|comments: &mut Vec<Comment>| {
            let index = comments
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| BackendError::not_found("Comment not found"))?;
            if comments[index].user_id != caller.user_id {
                return Err(BackendError::forbidden("Not allowed to delete this comment"));
            }
            Ok(comments.remove(index))
        })
        .await?;

    broadcast_comment_update(&app_state.connections, UpdateAction::Delete, &deleted);
    Ok(Json(deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::posts::handlers::create_post;
    use crate::backend::posts::types::CreatePostRequest;
    use crate::backend::server::testing::{add_user, session, test_state};
    use crate::shared::models::{Notification, Post};
    use tokio::sync::mpsc;
    use uuid::Uuid;

    async fn post_by(state: &AppState, caller: AuthUser) -> Post {
        let (_, Json(post)) = create_post(
            State(state.clone()),
            caller,
            ApiJson(CreatePostRequest {
                title: "Trip".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        post
    }

    fn text(content: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_comment_defaults_to_commenter_profile() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let post = post_by(&state, session(&state, &alice)).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.connections.subscribe_posts(Uuid::new_v4(), tx);

        let (status, Json(comment)) = create_comment(
            State(state.clone()),
            session(&state, &bob),
            ApiPath(post.id),
            ApiJson(text("nice")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment.username, "bob");
        assert_eq!(comment.avatar, bob.avatar);
        assert!(rx.try_recv().is_ok());

        let notifications: Vec<Notification> = state.store.load().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Comment);
    }

    #[tokio::test]
    async fn test_comment_on_unknown_post() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let err = create_comment(
            State(state.clone()),
            session(&state, &alice),
            ApiPath(7),
            ApiJson(text("hi")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_comments_oldest_first_for_post_only() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let first = post_by(&state, session(&state, &alice)).await;
        let second = post_by(&state, session(&state, &alice)).await;

        for (post_id, content) in [(first.id, "a"), (second.id, "x"), (first.id, "b")] {
            create_comment(
                State(state.clone()),
                session(&state, &alice),
                ApiPath(post_id),
                ApiJson(text(content)),
            )
            .await
            .unwrap();
        }

        let Json(comments) = list_comments(State(state.clone()), session(&state, &alice), ApiPath(first.id))
            .await
            .unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_only_commenter_may_delete() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let post = post_by(&state, session(&state, &alice)).await;
        let (_, Json(comment)) = create_comment(
            State(state.clone()),
            session(&state, &bob),
            ApiPath(post.id),
            ApiJson(text("mine")),
        )
        .await
        .unwrap();

        let err = delete_comment(State(state.clone()), session(&state, &alice), ApiPath(comment.id))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let Json(deleted) = delete_comment(State(state.clone()), session(&state, &bob), ApiPath(comment.id))
            .await
            .unwrap();
        assert_eq!(deleted, comment);
    }
}
