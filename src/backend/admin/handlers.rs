/**
 * Admin Handlers
 *
 * Maintenance endpoints for accounts flagged `isAdmin`. Every handler takes
 * the [`AdminUser`] extractor, so non-admin callers get 403 before the
 * handler runs.
 *
 * # Routes
 *
 * - `GET /api/admin/users` - every account with its post count
 * - `DELETE /api/admin/users/{id}` - delete an account and its data
 * - `DELETE /api/admin/clear-all` - delete every non-admin account
 */
use std::collections::HashSet;

use axum::{
    extract::State,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::admin::purge::purge_users;
use crate::backend::auth::users::find_user;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{AdminUser, ApiPath};
use crate::backend::server::state::AppState;
use crate::shared::api::MessageResponse;
use crate::shared::models::{Post, User, UserId};

/// One entry of `GET /api/admin/users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserEntry {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub posts_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Response of `DELETE /api/admin/clear-all`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClearAllResponse {
    pub message: String,
    pub removed_users: usize,
}

/// List every account
pub async fn list_all_users(
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<AdminUserEntry>>> {
    let users: Vec<User> = app_state.store.load().await?;
    let posts: Vec<Post> = app_state.store.load().await?;

    let entries = users
        .into_iter()
        .map(|u| AdminUserEntry {
            posts_count: posts.iter().filter(|p| p.author_id == u.id).count(),
            id: u.id,
            username: u.username,
            email: u.email,
            is_admin: u.is_admin,
            created_at: u.created_at,
        })
        .collect();
    Ok(Json(entries))
}

/// Delete an account and everything referencing it
///
/// # Errors
///
/// * `400 Bad Request` - If the admin targets their own account
/// * `404 Not Found` - If the user does not exist
pub async fn delete_user(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    if id == admin.id {
        return Err(BackendError::bad_request("Cannot delete your own account"));
    }
    if find_user(&app_state.store, &id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }

    purge_users(&app_state, &HashSet::from([id.clone()])).await?;
    tracing::warn!("Admin {} deleted user {}", admin.id, id);
    Ok(Json(MessageResponse::new("User deleted")))
}

/// Delete every non-admin account and its data
pub async fn clear_all(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<ClearAllResponse>> {
    let users: Vec<User> = app_state.store.load().await?;
    let doomed: HashSet<UserId> = users
        .into_iter()
        .filter(|u| !u.is_admin)
        .map(|u| u.id)
        .collect();

    let summary = purge_users(&app_state, &doomed).await?;
    tracing::warn!("Admin {} cleared {} users", admin.id, summary.users);
    Ok(Json(ClearAllResponse {
        message: "All user data cleared".to_string(),
        removed_users: summary.users,
    }))
}
