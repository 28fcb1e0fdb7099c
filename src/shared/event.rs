/**
 * Real-time Socket Frames
 *
 * This module defines the JSON frames exchanged over the WebSocket channel.
 * Every frame is an object discriminated by its `type` field.
 *
 * # Client Frames
 *
 * - `auth` - bind the socket to a user (`userId`, optional `token`)
 * - `subscribe-posts` - receive post and comment updates
 *
 * # Server Frames
 *
 * - `new-message` - a direct message addressed to the socket's user
 * - `post-update` - a post was added, updated or deleted
 * - `comment-update` - a comment was added or deleted
 * - `notification` - a notification for the socket's user
 * - `auth-ok` / `subscribed` / `error` - replies to client frames
 */
use serde::{Deserialize, Serialize};

use crate::shared::models::{Comment, Message, Notification, Post, UserId};

/// Frame sent by a client over the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Register this socket for the user's direct messages
    Auth {
        #[serde(rename = "userId", default)]
        user_id: Option<UserId>,
        #[serde(default)]
        token: Option<String>,
    },
    /// Register this socket for post and comment updates
    SubscribePosts,
}

/// Kind of mutation carried by `post-update` and `comment-update` frames
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Add,
    Update,
    Delete,
}

/// Frame pushed by the server to one or more sockets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    NewMessage {
        data: Message,
    },
    PostUpdate {
        action: UpdateAction,
        data: Post,
    },
    CommentUpdate {
        action: UpdateAction,
        data: Comment,
    },
    Notification {
        data: Notification,
    },
    AuthOk {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
    Subscribed {
        channel: String,
    },
    Error {
        error: String,
    },
}

impl ServerEvent {
    /// Reply sent after a socket subscribes to post updates
    pub fn subscribed_to_posts() -> Self {
        Self::Subscribed {
            channel: "posts".to_string(),
        }
    }

    /// Error reply for a rejected client frame
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Serialize the frame to the text sent over the socket
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_auth_frame() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"auth","userId":"42"}"#).unwrap();
        assert_eq!(
            frame,
            ClientFrame::Auth {
                user_id: Some("42".to_string()),
                token: None
            }
        );
    }

    #[test]
    fn test_parse_subscribe_posts_frame() {
        let frame: ClientFrame = serde_json::from_str(r#"{"type":"subscribe-posts"}"#).unwrap();
        assert_eq!(frame, ClientFrame::SubscribePosts);
    }

    #[test]
    fn test_unknown_frame_type_is_rejected() {
        let result = serde_json::from_str::<ClientFrame>(r#"{"type":"dance"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_message_frame_shape() {
        let message = Message {
            id: 7,
            sender_id: "a".to_string(),
            recipient_id: "b".to_string(),
            content: "hello".to_string(),
            timestamp: Utc::now(),
            is_read: false,
            likes: Vec::new(),
        };
        let json = ServerEvent::NewMessage { data: message }.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "new-message");
        assert_eq!(value["data"]["senderId"], "a");
    }

    #[test]
    fn test_post_update_frame_carries_action() {
        let now = Utc::now();
        let post = Post {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            author_id: "a".to_string(),
            author: "alice".to_string(),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(ServerEvent::PostUpdate {
            action: UpdateAction::Delete,
            data: post,
        })
        .unwrap();
        assert_eq!(value["type"], "post-update");
        assert_eq!(value["action"], "delete");
    }

    #[test]
    fn test_reply_frames() {
        let value = serde_json::to_value(ServerEvent::AuthOk {
            user_id: "u".to_string(),
        })
        .unwrap();
        assert_eq!(value["type"], "auth-ok");
        assert_eq!(value["userId"], "u");

        let value = serde_json::to_value(ServerEvent::subscribed_to_posts()).unwrap();
        assert_eq!(value["type"], "subscribed");
        assert_eq!(value["channel"], "posts");
    }
}
