/**
 * Entity Records
 *
 * This module defines the records persisted in the JSON collections and
 * returned by the REST API. Field names are camelCase on disk and on the
 * wire so that files written by earlier deployments keep loading.
 *
 * # Identifiers
 *
 * User ids are strings (the seeded admin account is `"admin"`, registered
 * users get the decimal form of a time-based id). Every other record uses a
 * numeric time-based id.
 *
 * # Compatibility
 *
 * Fields added after the first release carry `#[serde(default)]` so older
 * files deserialize without a migration step.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// User identifier (string, e.g. `"admin"` or `"1718000000000"`)
pub type UserId = String;

/// Numeric record identifier for posts, comments, messages, ...
pub type RecordId = i64;

/// Build the default avatar URL for a username
pub fn default_avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}

/// Accept a record id written either as a JSON number or as a decimal string
///
/// Older deployments stored `postId` on likes and comments as the raw route
/// parameter, so `"1718000000000"` and `1718000000000` must both load.
fn record_id_lenient<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(RecordId),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A registered account
///
/// The password is stored as entered; hashing is out of scope for this
/// service. Never serialize a `User` directly into a response, use one of
/// the projection types in the handler modules instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A post authored by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author_id: UserId,
    /// Display name supplied by the client at creation time
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `follower_id` follows `following_id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: RecordId,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A like on a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: RecordId,
    #[serde(deserialize_with = "record_id_lenient")]
    pub post_id: RecordId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post
///
/// `username` and `avatar` are denormalized copies taken when the comment
/// is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    #[serde(deserialize_with = "record_id_lenient")]
    pub post_id: RecordId,
    pub user_id: UserId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// A direct message between two users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: RecordId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    /// Ids of users who liked this message
    #[serde(default)]
    pub likes: Vec<UserId>,
}

impl Message {
    /// Whether `user_id` is the sender or the recipient
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// The other party of the conversation, seen from `user_id`
    pub fn counterpart(&self, user_id: &str) -> Option<&str> {
        if self.sender_id == user_id {
            Some(&self.recipient_id)
        } else if self.recipient_id == user_id {
            Some(&self.sender_id)
        } else {
            None
        }
    }
}

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
    Message,
}

/// A notification addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    pub user_id: UserId,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
