//! Post, feed and comment request/response types.

use serde::{Deserialize, Serialize};

use crate::shared::models::Post;

/// Body of `POST /api/posts`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Display name; defaults to `"Anonymous"`
    pub author: Option<String>,
}

/// Body of `PUT /api/posts/{id}`
///
/// Missing or empty fields keep their current value.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as shown in the caller's feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: usize,
    /// Whether the caller liked this post
    pub is_liked: bool,
    pub comment_count: usize,
}

/// Body of `POST /api/posts/{id}/comments`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    /// Defaults to the commenter's username
    pub username: Option<String>,
    /// Defaults to the commenter's avatar
    pub avatar: Option<String>,
}
