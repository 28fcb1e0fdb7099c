//! Shared Error Types
//!
//! This module defines error types for problems with client-supplied data.
//! They are raised by request validation and converted into HTTP errors by
//! the backend.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field is missing or has an unacceptable value
//! - `TooLarge` - A field exceeds its size limit
//!
//! # Usage
//!
//! ```rust
//! use socialhub::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username and password are required");
//! ```
use thiserror::Error;

/// Errors caused by invalid client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A field is larger than allowed
    #[error("{field} is too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// The offending field
        field: String,
        /// Actual size in bytes
        size: usize,
        /// Allowed size in bytes
        limit: usize,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new size-limit error
    pub fn too_large(field: impl Into<String>, size: usize, limit: usize) -> Self {
        Self::TooLarge {
            field: field.into(),
            size,
            limit,
        }
    }
}

/// Require a non-empty string field
///
/// Whitespace-only values count as present.
pub fn require<'a>(
    field: &str,
    value: Option<&'a str>,
    message: &str,
) -> Result<&'a str, SharedError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SharedError::validation(field, message)),
    }
}
