//! REST Response Shapes
//!
//! Projections of records returned by more than one endpoint. Handler
//! modules keep their endpoint-specific request and response types next to
//! the handlers.

use serde::{Deserialize, Serialize};

use crate::shared::models::{User, UserId};

/// `{"message": "..."}` acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Minimal public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Public view of a user in follower and following lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCard {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
    pub bio: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// The signed-in user as returned by login and verify-token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub is_admin: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            is_admin: user.is_admin,
        }
    }
}
