//! socialhub - Main Library
//!
//! socialhub is a small social-networking backend: users, posts, follows,
//! likes, comments, direct messages and notifications, persisted as flat
//! JSON files and pushed live to browsers over a WebSocket channel.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Wire and storage types
//!   - Entity records (users, posts, messages, ...)
//!   - Socket frames exchanged with clients
//!   - Error types
//!
//! - **`backend`** - Axum HTTP server
//!   - JSON file store and id generation
//!   - Token registry and REST handlers
//!   - WebSocket connection registry and broadcasting
//!
//! # Usage
//!
//! ```rust,no_run
//! use socialhub::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `Arc`. In-memory registries use
//! `std::sync` locks that are never held across an `.await`; each JSON
//! collection has its own `tokio::sync::Mutex` serializing read-modify-write
//! cycles.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
