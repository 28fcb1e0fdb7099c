//! Backend Error Module
//!
//! This module defines the error type used by HTTP handlers and its
//! conversion into JSON error responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use socialhub::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::not_found("Post not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias used by handlers
pub type ApiResult<T> = Result<T, BackendError>;
