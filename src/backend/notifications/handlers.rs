/**
 * Notification Handlers
 *
 * - `GET /api/notifications` - the caller's notifications, newest first
 * - `PUT /api/notifications/{id}/read` - mark one as read
 * - `DELETE /api/notifications` - remove all of the caller's notifications
 */
use axum::{
    extract::State,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::models::{Notification, RecordId};

/// Response of `DELETE /api/notifications`
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of notifications removed
    pub removed: usize,
}

/// List the caller's notifications, newest first
pub async fn list_notifications(
    State(app_state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications: Vec<Notification> = app_state.store.load().await?;
    let mut mine: Vec<Notification> = notifications
        .into_iter()
        .filter(|n| n.user_id == caller.user_id)
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(Json(mine))
}

/// Mark one of the caller's notifications as read
///
/// # Errors
///
/// * `404 Not Found` - If the notification does not exist or belongs to someone else
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<Notification>> {
    let notification = app_state
        .store
        .update(|items: &mut Vec<Notification>| {
            let notification = items
                .iter_mut()
                .find(|n| n.id == id && n.user_id == caller.user_id)
                .ok_or_else(|| BackendError::not_found("Notification not found"))?;
            notification.read = true;
            Ok::<_, BackendError>(notification.clone())
        })
        .await?;
    Ok(Json(notification))
}

/// Remove all of the caller's notifications
pub async fn clear_notifications(
    State(app_state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<ClearResponse>> {
    let removed = app_state
        .store
        .update(|items: &mut Vec<Notification>| {
            let before = items.len();
            items.retain(|n| n.user_id != caller.user_id);
            Ok::<_, BackendError>(before - items.len())
        })
        .await?;

    tracing::debug!("Cleared {} notifications for {}", removed, caller.user_id);
    Ok(Json(ClearResponse {
        message: "Notifications cleared".to_string(),
        removed,
    }))
}
