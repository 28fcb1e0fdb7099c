//! Direct message request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::models::UserId;

/// Body of `POST /api/messages`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: Option<UserId>,
    pub content: Option<String>,
}

/// Response of `POST /api/messages/{id}/like`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Whether the caller likes the message after the toggle
    pub liked: bool,
    pub likes_count: usize,
}

/// One entry of `GET /api/conversations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// The other party
    pub user_id: UserId,
    pub username: String,
    pub avatar: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    /// Messages from the other party the caller has not read
    pub unread_count: usize,
}
