//! Backend Module
//!
//! This module contains all server-side code for socialhub: an Axum HTTP
//! server with a REST API, a WebSocket push channel and flat-file storage.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state and initialization
//! - **`routes`** - Route configuration, middleware and static files
//! - **`store`** - JSON collection files and id generation
//! - **`auth`** - Registration, login and the token registry
//! - **`middleware`** - Bearer-token and admin extractors
//! - **`realtime`** - WebSocket connections and event broadcasting
//! - **`users`** - User directory and profiles
//! - **`posts`** - Posts, feed, likes and comments
//! - **`follows`** - Follow relationships
//! - **`messaging`** - Direct messages and conversations
//! - **`notifications`** - Notification records and push
//! - **`admin`** - Account maintenance
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── store/          - JSON file store
//! ├── auth/           - Authentication
//! ├── middleware/     - Request extractors
//! ├── realtime/       - WebSocket fan-out
//! ├── users/          - User directory
//! ├── posts/          - Posts and feed
//! ├── follows/        - Follows
//! ├── messaging/      - Direct messages
//! ├── notifications/  - Notifications
//! ├── admin/          - Admin maintenance
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every handler loads the collections it needs fresh from disk. Mutations
//! go through `JsonStore::update`, which holds the collection's lock for the
//! whole read-modify-write cycle, then broadcast the change to the sockets
//! that should see it.
//!
//! # Error Handling
//!
//! Handlers return `ApiResult<T>`; every `BackendError` renders as
//! `{"error": ..., "status": ...}` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// JSON collection store
pub mod store;

/// Backend error types
pub mod error;

/// Authentication and token management
pub mod auth;

/// Request extractors
pub mod middleware;

/// Real-time update system
pub mod realtime;

/// User directory
pub mod users;

/// Posts, feed, likes and comments
pub mod posts;

/// Follow relationships
pub mod follows;

/// Direct messages
pub mod messaging;

/// Notifications
pub mod notifications;

/// Admin maintenance
pub mod admin;

/// Re-export commonly used types
pub use error::{ApiResult, BackendError};
pub use server::{create_app, AppState, ServerConfig};
