/**
 * Authentication Extractors
 *
 * This module provides the extractors that protect routes requiring an
 * authenticated caller. The bearer token is taken from the
 * `Authorization: Bearer <token>` header and must be present in the token
 * registry.
 *
 * - [`AuthUser`] - any caller holding an active token (401 otherwise)
 * - [`AdminUser`] - an authenticated caller whose account has `isAdmin`
 *   and whose token came from a login on this process (403 otherwise)
 */
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::tokens::TokenRegistry;
use crate::backend::auth::users::find_user;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::models::{User, UserId};

/// Extract the bearer token from request headers
///
/// Returns `None` if the header is missing, not UTF-8 or not of the form
/// `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// Authenticated caller
///
/// Use as a handler parameter; the request is rejected with 401 before the
/// handler runs if the token is missing or not active.
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// The caller's user id (the token's prefix)
    pub user_id: UserId,
    /// The bearer token the request carried
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::debug!("Missing bearer token on {}", parts.uri.path());
            BackendError::unauthorized()
        })?;

        if !state.tokens.contains(token) {
            tracing::debug!("Inactive token on {}", parts.uri.path());
            return Err(BackendError::unauthorized());
        }

        let user_id = TokenRegistry::owner(token).ok_or_else(BackendError::unauthorized)?;

        Ok(AuthUser {
            user_id,
            token: token.to_string(),
        })
    }
}

/// Authenticated administrator
///
/// Rejects with 401 like [`AuthUser`], and with 403 if the caller's account
/// is missing or not flagged as admin, or if the token was only restored
/// through verify-token.
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;

        if !state.tokens.is_issued(&caller.token) {
            tracing::warn!("Restored token used for {} by {}", parts.uri.path(), caller.user_id);
            return Err(BackendError::forbidden("Admin access requires a fresh login"));
        }

        match find_user(&state.store, &caller.user_id).await? {
            Some(user) if user.is_admin => Ok(AdminUser(user)),
            _ => {
                tracing::warn!("Non-admin {} tried {}", caller.user_id, parts.uri.path());
                Err(BackendError::forbidden("Admin access required"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer 42-1700")), Some("42-1700"));
    }

    #[test]
    fn test_bearer_token_missing() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
    }
}
