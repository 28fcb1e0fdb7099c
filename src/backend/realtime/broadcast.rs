/**
 * Real-time Event Broadcasting
 *
 * Helpers that push a [`ServerEvent`] to the sockets that should see it.
 * Handlers call them right after a mutation has been written to disk.
 *
 * # Routing
 *
 * - `new-message` → every connection of the recipient
 * - `post-update` / `comment-update` → every post subscriber
 * - `notification` → every connection of the notified user
 *
 * Every helper returns the number of connections the event was queued to.
 * A connection whose writer task has already finished is skipped; the socket
 * task removes it from the registry when it shuts down.
 */
use axum::extract::ws;

use crate::backend::realtime::registry::{ConnectionRegistry, ConnectionSender};
use crate::shared::event::{ServerEvent, UpdateAction};
use crate::shared::models::{Comment, Message, Notification, Post};

/// Push a direct message to the recipient's connections
pub fn broadcast_message(registry: &ConnectionRegistry, message: &Message) -> usize {
    let recipients = registry.user_senders(&message.recipient_id);
    let event = ServerEvent::NewMessage {
        data: message.clone(),
    };
    deliver(&recipients, &event)
}

/// Push a post mutation to every post subscriber
pub fn broadcast_post_update(
    registry: &ConnectionRegistry,
    action: UpdateAction,
    post: &Post,
) -> usize {
    let event = ServerEvent::PostUpdate {
        action,
        data: post.clone(),
    };
    deliver(&registry.post_senders(), &event)
}

/// Push a comment mutation to every post subscriber
pub fn broadcast_comment_update(
    registry: &ConnectionRegistry,
    action: UpdateAction,
    comment: &Comment,
) -> usize {
    let event = ServerEvent::CommentUpdate {
        action,
        data: comment.clone(),
    };
    deliver(&registry.post_senders(), &event)
}

/// Push a notification to its owner's connections
pub fn push_notification(registry: &ConnectionRegistry, notification: &Notification) -> usize {
    let recipients = registry.user_senders(&notification.user_id);
    let event = ServerEvent::Notification {
        data: notification.clone(),
    };
    deliver(&recipients, &event)
}

/// Send one event to a single connection
///
/// Used for replies to client frames. Returns whether the frame was queued.
pub fn send_event(sender: &ConnectionSender, event: &ServerEvent) -> bool {
    deliver(std::slice::from_ref(sender), event) == 1
}

fn deliver(senders: &[ConnectionSender], event: &ServerEvent) -> usize {
    if senders.is_empty() {
        return 0;
    }

    let text = match event.to_json() {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("[Realtime] Failed to serialize event: {}", e);
            return 0;
        }
    };

    let delivered = senders
        .iter()
        .filter(|sender| sender.send(ws::Message::Text(text.clone().into())).is_ok())
        .count();

    tracing::debug!(
        "[Realtime] Event queued to {}/{} connections",
        delivered,
        senders.len()
    );
    delivered
}
