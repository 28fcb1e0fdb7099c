/**
 * Conversation List
 *
 * `GET /api/conversations` groups the caller's messages by counterpart and
 * returns one summary per counterpart, most recent conversation first.
 */
use std::collections::HashMap;

use axum::{extract::State, response::Json};

use crate::backend::error::ApiResult;
use crate::backend::messaging::types::Conversation;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::models::{Message, User};

/// Name shown for a counterpart missing from `users.json`
const UNKNOWN_USER: &str = "Unknown user";

/// Summarize the conversations of `user_id`
///
/// Messages are expected in stored (chronological) order; the last message
/// seen per counterpart wins. Ties on time are broken by stored position.
pub fn summarize_conversations(
    user_id: &str,
    messages: &[Message],
    users: &[User],
) -> Vec<Conversation> {
    let mut by_counterpart: HashMap<&str, (usize, Conversation)> = HashMap::new();

    for (position, message) in messages.iter().enumerate() {
        let Some(other) = message.counterpart(user_id) else {
            continue;
        };
        let unread = usize::from(message.recipient_id == user_id && !message.is_read);

        by_counterpart
            .entry(other)
            .and_modify(|(last, c)| {
                *last = position;
                c.last_message = message.content.clone();
                c.last_message_time = message.timestamp;
                c.unread_count += unread;
            })
            .or_insert_with(|| {
                let user = users.iter().find(|u| u.id == other);
                let conversation = Conversation {
                    user_id: other.to_string(),
                    username: user.map_or_else(|| UNKNOWN_USER.to_string(), |u| u.username.clone()),
                    avatar: user.map(|u| u.avatar.clone()).unwrap_or_default(),
                    last_message: message.content.clone(),
                    last_message_time: message.timestamp,
                    unread_count: unread,
                };
                (position, conversation)
            });
    }

    let mut conversations: Vec<(usize, Conversation)> = by_counterpart.into_values().collect();
    conversations.sort_by(|(pa, a), (pb, b)| {
        b.last_message_time
            .cmp(&a.last_message_time)
            .then(pb.cmp(pa))
    });
    conversations.into_iter().map(|(_, c)| c).collect()
}

/// List the caller's conversations
pub async fn list_conversations(
    State(app_state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<Conversation>>> {
    let messages: Vec<Message> = app_state.store.load().await?;
    let users: Vec<User> = app_state.store.load().await?;
    Ok(Json(summarize_conversations(
        &caller.user_id,
        &messages,
        &users,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: format!("{}-name", id),
            password: "pw".to_string(),
            email: String::new(),
            avatar: format!("{}.svg", id),
            bio: String::new(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    fn message(id: i64, from: &str, to: &str, minute: i64, is_read: bool) -> Message {
        let base = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        Message {
            id,
            sender_id: from.to_string(),
            recipient_id: to.to_string(),
            content: format!("m{}", id),
            timestamp: base + Duration::minutes(minute),
            is_read,
            likes: Vec::new(),
        }
    }

    #[test]
    fn test_summarize_conversations() {
        let users = vec![user("me"), user("bob")];
        let messages = vec![
            message(1, "bob", "me", 0, false),
            message(2, "me", "bob", 1, false),
            message(3, "ghost", "me", 2, false),
            message(4, "bob", "me", 3, false),
            message(5, "bob", "me", 4, true),
            message(6, "bob", "carol", 5, false),
        ];

        let conversations = summarize_conversations("me", &messages, &users);
        assert_eq!(conversations.len(), 2);

        let bob = &conversations[0];
        assert_eq!(bob.user_id, "bob");
        assert_eq!(bob.username, "bob-name");
        assert_eq!(bob.avatar, "bob.svg");
        assert_eq!(bob.last_message, "m5");
        assert_eq!(bob.unread_count, 2);

        let ghost = &conversations[1];
        assert_eq!(ghost.username, "Unknown user");
        assert_eq!(ghost.avatar, "");
        assert_eq!(ghost.unread_count, 1);
    }

    #[test]
    fn test_no_messages() {
        assert!(summarize_conversations("me", &[], &[]).is_empty());
    }
}
