//! User directory request/response types.

use serde::{Deserialize, Serialize};

use crate::shared::models::UserId;

/// One entry of `GET /api/users/search/{query}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
    pub bio: String,
    /// Whether the caller follows this user
    pub is_following: bool,
    pub posts_count: usize,
    pub followers_count: usize,
    pub following_count: usize,
}

/// Response of `GET /api/users/{id}/profile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
    pub email: String,
    pub posts_count: usize,
    /// Number of followers
    pub followers: usize,
    /// Number of users followed
    pub following: usize,
    /// `None` when the caller views their own profile
    pub is_following: Option<bool>,
    pub bio: String,
}

/// Body of `PUT /api/users/{id}`
///
/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateUserRequest {
    pub bio: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// Response of `PUT /api/users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatedUser {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
    pub email: String,
    pub bio: String,
}
