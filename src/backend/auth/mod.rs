//! Authentication Module
//!
//! This module handles user registration, login and session tokens.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User lookups and creation in `users.json`
//! - **`tokens`** - In-memory registry of active bearer tokens
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User records
//! ├── tokens.rs       - Token registry
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - User authentication handler
//!     ├── logout.rs   - Token revocation handler
//!     └── verify.rs   - Token re-activation handler
//! ```
//!
//! # Security
//!
//! Tokens are opaque and only checked for membership in the active set.
//! Passwords are stored and compared as entered.

/// User records
pub mod users;

/// Token registry
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{login, logout, register, verify_token};
pub use tokens::TokenRegistry;
