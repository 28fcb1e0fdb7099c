/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Request-level failures with an explicit status code: missing fields,
 * missing or revoked tokens, ownership violations, unknown ids.
 *
 * ## Validation Errors
 *
 * `SharedError` values raised while checking client input. Validation
 * failures map to 400, size-limit failures to 413.
 *
 * ## Internal Errors
 *
 * Storage failures, including a collection file that no longer parses.
 * They map to 500; the details are logged and the client only sees a
 * generic message.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use socialhub::backend::error::BackendError;
///
/// let err = BackendError::not_found("Post not found");
/// let err = BackendError::forbidden("Not allowed to edit this post");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing token, unknown id)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Invalid client input
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Collection file failure
    #[error(transparent)]
    StoreError(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation, 413 for size limits
    /// - `StoreError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    ///
    /// Internal errors are not described to clients.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::StoreError(_) => "Internal server error".to_string(),
        }
    }
}
