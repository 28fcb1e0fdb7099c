/**
 * Notification Service
 *
 * Creates notification records and pushes them to the owner's open sockets.
 * Called by the follow, like, comment and message handlers after their own
 * mutation has been written.
 *
 * A failure to record a notification is logged and does not fail the request
 * that triggered it; the triggering mutation is already on disk.
 */
use chrono::Utc;

use crate::backend::auth::users::find_user;
use crate::backend::realtime::push_notification;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::models::{Notification, NotificationKind};

/// Display name used in notification texts
///
/// Falls back to `"Someone"` for unknown ids.
pub async fn actor_name(app_state: &AppState, user_id: &str) -> String {
    match find_user(&app_state.store, user_id).await {
        Ok(Some(user)) => user.username,
        Ok(None) => "Someone".to_string(),
        Err(e) => {
            tracing::warn!("Failed to look up user {}: {}", user_id, e);
            "Someone".to_string()
        }
    }
}

/// Record a notification for `user_id` and push it to their sockets
pub async fn create_notification(
    app_state: &AppState,
    user_id: &str,
    kind: NotificationKind,
    content: String,
) -> Result<Notification, StoreError> {
    let notification = Notification {
        id: app_state.ids.next_id(),
        user_id: user_id.to_string(),
        content,
        kind,
        read: false,
        created_at: Utc::now(),
    };

    app_state
        .store
        .update(|items: &mut Vec<Notification>| {
            items.push(notification.clone());
            Ok::<_, StoreError>(())
        })
        .await?;

    let pushed = push_notification(&app_state.connections, &notification);
    tracing::debug!(
        "Notification {} for {} pushed to {} sockets",
        notification.id,
        user_id,
        pushed
    );
    Ok(notification)
}

/// [`create_notification`], logging instead of failing
pub async fn notify(
    app_state: &AppState,
    user_id: &str,
    kind: NotificationKind,
    content: String,
) -> Option<Notification> {
    match create_notification(app_state, user_id, kind, content).await {
        Ok(notification) => Some(notification),
        Err(e) => {
            tracing::error!("Failed to record notification for {}: {}", user_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::testing::{add_user, test_state};
    use axum::extract::ws;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_notification_persists_and_pushes() {
        let (_dir, state) = test_state().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.connections.register_user(Uuid::new_v4(), "bob", tx);

        let notification = create_notification(
            &state,
            "bob",
            NotificationKind::Follow,
            "alice started following you".to_string(),
        )
        .await
        .unwrap();

        let stored: Vec<Notification> = state.store.load().await.unwrap();
        assert_eq!(stored, vec![notification.clone()]);

        match rx.try_recv().unwrap() {
            ws::Message::Text(text) => {
                let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
                assert_eq!(value["type"], "notification");
                assert_eq!(value["data"]["id"], notification.id);
                assert_eq!(value["data"]["type"], "follow");
            }
            other => panic!("Expected text frame, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_actor_name() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        assert_eq!(actor_name(&state, &alice.id).await, "alice");
        assert_eq!(actor_name(&state, "ghost").await, "Someone");
    }
}
