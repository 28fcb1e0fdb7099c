/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across register, login and verify-token handlers.
 *
 * Request fields are optional so that a missing field is answered with a
 * 400 and a readable message rather than a body-deserialization rejection.
 */
use serde::{Deserialize, Serialize};

use crate::shared::api::SessionUser;
use crate::shared::models::UserId;

/// Register request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Defaults to an empty string
    pub email: Option<String>,
    /// Defaults to a generated avatar URL
    pub avatar: Option<String>,
}

/// Register response
///
/// The new account without its password.
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub message: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response
///
/// Contains the bearer token and the signed-in user.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    /// Bearer token (`userId-timestamp`)
    pub token: String,
    pub user: SessionUser,
}

/// Verify-token response
#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyResponse {
    pub valid: bool,
    /// The token owner, if the account still exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}
