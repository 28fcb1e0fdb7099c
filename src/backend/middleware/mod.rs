//! Middleware Module
//!
//! This module contains the request-level guards for the backend server.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - Bearer-token extractors for protected routes
//! - **`extract`** - `Json`/`Path` wrappers with JSON error rejections
//!
//! # Example
//!
//! ```rust,no_run
//! use socialhub::backend::middleware::AuthUser;
//!
//! async fn whoami(caller: AuthUser) -> String {
//!     caller.user_id
//! }
//! ```

pub mod auth;
pub mod extract;

pub use auth::{bearer_token, AdminUser, AuthUser};
pub use extract::{ApiJson, ApiPath};
