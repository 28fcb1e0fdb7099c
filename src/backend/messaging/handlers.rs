/**
 * Direct Message Handlers
 *
 * # Routes
 *
 * - `GET /api/messages/{otherUserId}` - the thread between the caller and another user
 * - `POST /api/messages` - send a message; pushed to the recipient's sockets
 * - `PUT /api/messages/{id}/read` - recipient marks a message read
 * - `DELETE /api/messages/{id}` - sender retracts a message
 * - `POST /api/messages/{id}/like` - either party toggles their like
 *
 * Messages are never checked against `users.json`; a message to an unknown
 * id is stored and simply never delivered live.
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::messaging::types::{LikeResponse, SendMessageRequest};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::notifications::{actor_name, notify};
use crate::backend::realtime::broadcast_message;
use crate::backend::server::state::AppState;
use crate::shared::models::{Message, NotificationKind, RecordId, UserId};

fn message_not_found() -> BackendError {
    BackendError::not_found("Message not found")
}

/// The thread between the caller and `{other}`, in stored order
pub async fn get_messages(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(other): ApiPath<UserId>,
) -> ApiResult<Json<Vec<Message>>> {
    let messages: Vec<Message> = app_state.store.load().await?;
    let thread = messages
        .into_iter()
        .filter(|m| {
            (m.sender_id == caller.user_id && m.recipient_id == other)
                || (m.sender_id == other && m.recipient_id == caller.user_id)
        })
        .collect();
    Ok(Json(thread))
}

/// Send a direct message
///
/// # Errors
///
/// * `400 Bad Request` - If the recipient or the content is missing
pub async fn send_message(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let (recipient_id, content) = match (request.recipient_id, request.content) {
        (Some(recipient), Some(content)) if !recipient.is_empty() && !content.is_empty() => {
            (recipient, content)
        }
        _ => {
            return Err(BackendError::bad_request(
                "Recipient and content are required",
            ))
        }
    };

    let message = Message {
        id: app_state.ids.next_id(),
        sender_id: caller.user_id.clone(),
        recipient_id,
        content,
        timestamp: Utc::now(),
        is_read: false,
        likes: Vec::new(),
    };

    app_state
        .store
        .update(|messages: &mut Vec<Message>| {
            messages.push(message.clone());
            Ok::<_, BackendError>(())
        })
        .await?;

    let delivered = broadcast_message(&app_state.connections, &message);
    tracing::info!(
        "Message {} from {} to {} (live on {} sockets)",
        message.id,
        message.sender_id,
        message.recipient_id,
        delivered
    );

    let who = actor_name(&app_state, &caller.user_id).await;
    notify(
        &app_state,
        &message.recipient_id,
        NotificationKind::Message,
        format!("{} sent you a message", who),
    )
    .await;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Mark a received message as read
///
/// # Errors
///
/// * `404 Not Found` - If the message does not exist
/// * `403 Forbidden` - If the caller is not the recipient
pub async fn mark_message_read(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<Message>> {
    let message = app_state
        .store
        .update(|messages: &mut Vec<Message>| {
            let message = messages
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(message_not_found)?;
            if message.recipient_id != caller.user_id {
                return Err(BackendError::forbidden(
                    "Only the recipient can mark a message read",
                ));
            }
            message.is_read = true;
            Ok(message.clone())
        })
        .await?;
    Ok(Json(message))
}

/// Retract a sent message
///
/// Returns the removed message.
///
/// # Errors
///
/// * `404 Not Found` - If the message does not exist
/// * `403 Forbidden` - If the caller is not the sender
pub async fn retract_message(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<Message>> {
    let message = app_state
        .store
        .update(|messages: &mut Vec<Message>| {
            let index = messages
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(message_not_found)?;
            if messages[index].sender_id != caller.user_id {
                return Err(BackendError::forbidden(
                    "Only the sender can retract a message",
                ));
            }
            Ok(messages.remove(index))
        })
        .await?;

    tracing::info!("Message {} retracted by {}", message.id, caller.user_id);
    Ok(Json(message))
}

/// Toggle the caller's like on a message
///
/// # Errors
///
/// * `404 Not Found` - If the message does not exist
/// * `403 Forbidden` - If the caller is neither sender nor recipient
pub async fn toggle_message_like(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<RecordId>,
) -> ApiResult<Json<LikeResponse>> {
    let response = app_state
        .store
        .update(|messages: &mut Vec<Message>| {
            let message = messages
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(message_not_found)?;
            if !message.involves(&caller.user_id) {
                return Err(BackendError::forbidden(
                    "Only the sender or recipient can like a message",
                ));
            }

            let liked = match message.likes.iter().position(|u| *u == caller.user_id) {
                Some(index) => {
                    message.likes.remove(index);
                    false
                }
                None => {
                    message.likes.push(caller.user_id.clone());
                    true
                }
            };
            Ok(LikeResponse {
                liked,
                likes_count: message.likes.len(),
            })
        })
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::testing::{add_user, session, test_state};
    use crate::shared::models::{Notification, NotificationKind};
    use axum::extract::ws;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    async fn send(state: &AppState, caller: AuthUser, to: &str, content: &str) -> Message {
        let request = SendMessageRequest {
            recipient_id: Some(to.to_string()),
            content: Some(content.to_string()),
        };
        let (status, Json(message)) = send_message(State(state.clone()), caller, ApiJson(request))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        message
    }

    #[tokio::test]
    async fn test_send_message_requires_fields() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let request = SendMessageRequest {
            recipient_id: Some("bob".to_string()),
            content: None,
        };
        let err = send_message(State(state.clone()), session(&state, &alice), ApiJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Recipient and content are required");
    }

    #[tokio::test]
    async fn test_send_message_pushes_and_notifies() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.connections.register_user(Uuid::new_v4(), &bob.id, tx);

        let message = send(&state, session(&state, &alice), &bob.id, "hi bob").await;
        assert!(!message.is_read);
        assert!(message.likes.is_empty());

        let mut types = Vec::new();
        while let Ok(ws::Message::Text(text)) = rx.try_recv() {
            let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
            types.push(value["type"].as_str().unwrap().to_string());
        }
        assert_eq!(types, vec!["new-message", "notification"]);

        let notifications: Vec<Notification> = state.store.load().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Message);
        assert_eq!(notifications[0].content, "alice sent you a message");
    }

    #[tokio::test]
    async fn test_get_messages_returns_both_directions() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let carol = add_user(&state, "carol").await;

        send(&state, session(&state, &alice), &bob.id, "one").await;
        send(&state, session(&state, &bob), &alice.id, "two").await;
        send(&state, session(&state, &carol), &alice.id, "other").await;

        let Json(thread) = get_messages(
            State(state.clone()),
            session(&state, &alice),
            ApiPath(bob.id.clone()),
        )
        .await
        .unwrap();
        let contents: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_only_recipient_marks_read() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let message = send(&state, session(&state, &alice), &bob.id, "hi").await;

        let err = mark_message_read(
            State(state.clone()),
            session(&state, &alice),
            ApiPath(message.id),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let Json(read) = mark_message_read(
            State(state.clone()),
            session(&state, &bob),
            ApiPath(message.id),
        )
        .await
        .unwrap();
        assert!(read.is_read);

        let err = mark_message_read(State(state.clone()), session(&state, &bob), ApiPath(1))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_only_sender_retracts() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let message = send(&state, session(&state, &alice), &bob.id, "oops").await;

        let err = retract_message(State(state.clone()), session(&state, &bob), ApiPath(message.id))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let Json(removed) =
            retract_message(State(state.clone()), session(&state, &alice), ApiPath(message.id))
                .await
                .unwrap();
        assert_eq!(removed.id, message.id);
        let messages: Vec<Message> = state.store.load().await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_message_like() {
        let (_dir, state) = test_state().await;
        let alice = add_user(&state, "alice").await;
        let bob = add_user(&state, "bob").await;
        let carol = add_user(&state, "carol").await;
        let message = send(&state, session(&state, &alice), &bob.id, "hi").await;

        let Json(first) =
            toggle_message_like(State(state.clone()), session(&state, &bob), ApiPath(message.id))
                .await
                .unwrap();
        assert_eq!(first, LikeResponse { liked: true, likes_count: 1 });

        let Json(second) =
            toggle_message_like(State(state.clone()), session(&state, &bob), ApiPath(message.id))
                .await
                .unwrap();
        assert_eq!(second, LikeResponse { liked: false, likes_count: 0 });

        let err =
            toggle_message_like(State(state.clone()), session(&state, &carol), ApiPath(message.id))
                .await
                .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
