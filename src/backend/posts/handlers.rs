/**
 * Post Handlers
 *
 * CRUD endpoints for posts. Every mutation is broadcast to the post
 * subscribers as a `post-update` frame after it has been written.
 *
 * # Routes
 *
 * - `GET /api/posts` - all posts in stored order
 * - `POST /api/posts` - create a post authored by the caller
 * - `PUT /api/posts/{id}` - edit a post (author only)
 * - `DELETE /api/posts/{id}` - delete a post (author only)
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::posts::types::{CreatePostRequest, UpdatePostRequest};
use crate::backend::realtime::broadcast_post_update;
use crate::backend::server::state::AppState;
use crate::shared::event::UpdateAction;
use crate::shared::models::{Post, RecordId};

/// List every post
pub async fn list_posts(
    State(app_state): State<AppState>,
    _caller: AuthUser,
) -> ApiResult<Json<Vec<Post>>> {
    let posts: Vec<Post> = app_state.store.load().await?;
    Ok(Json(posts))
}

/// Create a post
///
/// # Returns
///
/// `201 Created` with the new post
pub async fn create_post(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let now = Utc::now();
    let post = Post {
        id: app_state.ids.next_id(),
        title: request.title,
        content: request.content,
        author_id: caller.user_id,
        author: request
            .author
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Anonymous".to_string()),
        created_at: now,
        updated_at: now,
    };

    app_state
        .store
        .update(|posts: &mut Vec<Post>| {
            posts.push(post.clone());
            Ok::<_, BackendError>(())
        })
        .await?;

    tracing::info!("Post {} created by {}", post.id, post.author_id);
    broadcast_post_update(&app_state.connections, UpdateAction::Add, &post);
    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a post
///
/// # Errors
///
/// * `404 Not Found` - If the post does not exist
/// * `403 Forbidden` - If the caller is not the author
pub async fn update_post(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(request): ApiJson<UpdatePostRequest>,
) -> ApiResult<Json<Post>> {
    let post = app_state
        .store
        .update(|posts: &mut Vec<Post>| {
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| BackendError::not_found("Post not found"))?;
            if post.author_id != caller.user_id {
                return Err(BackendError::forbidden("Not allowed to edit this post"));
            }

            if let Some(title) = request.title.filter(|t| !t.is_empty()) {
                post.title = title;
            }
            if let Some(content) = request.content.filter(|c| !c.is_empty()) {
                post.content = content;
            }
            post.updated_at = Utc::now();
            Ok(post.clone())
        })
        .await?;

    broadcast_post_update(&app_state.connections, UpdateAction::Update, &post);
    Ok(Json(post))
}

/// Delete a post
///
/// Likes and comments on the post are left in place.
///
/// # Errors
///
/// * `404 Not Found` - If the post does not exist
/// * `403 Forbidden` - If the caller is not the author
pub async fn delete_post(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<Post>> {
    let deleted = app_state
        .store
        .update(|posts: &mut Vec<Post>| {
            let index = posts
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| BackendError::not_found("Post not found"))?;
            if posts[index].author_id != caller.user_id {
                return Err(BackendError::forbidden("Not allowed to delete this post"));
            }
            Ok(posts.remove(index))
        })
        .await?;

    tracing::info!("Post {} deleted by {}", deleted.id, caller.user_id);
    broadcast_post_update(&app_state.connections, UpdateAction::Delete, &deleted);
    Ok(Json(deleted))
}
