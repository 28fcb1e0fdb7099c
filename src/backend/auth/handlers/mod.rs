//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Token revocation handler
//! └── verify.rs   - Token re-activation handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Revoke the caller's token
//! - **`verify_token`** - POST /api/auth/verify-token - Re-activate a stored token
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password → user created (no token)
//! 2. **Login**: credentials checked → `userId-timestamp` token issued
//! 3. **Requests**: `Authorization: Bearer <token>` checked against the active set
//! 4. **Logout**: token removed from the active set

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Verify-token handler
pub mod verify;

// Re-export commonly used types
pub use types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, VerifyResponse};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use register::register;
pub use verify::verify_token;
