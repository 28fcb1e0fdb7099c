//! Real-time Update Module
//!
//! This module pushes live updates to browsers over a WebSocket channel:
//! new direct messages, post and comment mutations, and notifications.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`registry`** - Which sockets are open and who they belong to
//! - **`broadcast`** - Fan-out helpers called by the REST handlers
//! - **`socket`** - The `GET /ws` endpoint and per-socket loop
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── registry.rs  - Connection registry
//! ├── broadcast.rs - Event broadcasting helpers
//! └── socket.rs    - WebSocket handler
//! ```
//!
//! # Event Routing
//!
//! | Event | Recipients |
//! |---|---|
//! | `new-message` | the recipient's sockets |
//! | `post-update` | every post subscriber |
//! | `comment-update` | every post subscriber |
//! | `notification` | the notified user's sockets |
//!
//! # Example
//!
//! ```rust,no_run
//! use socialhub::backend::realtime::{broadcast_post_update, ConnectionRegistry};
//! use socialhub::shared::{Post, UpdateAction};
//!
//! fn on_post_created(registry: &ConnectionRegistry, post: &Post) {
//!     let count = broadcast_post_update(registry, UpdateAction::Add, post);
//!     tracing::debug!("post-update queued to {} sockets", count);
//! }
//! ```

/// Connection registry
pub mod registry;

/// Event broadcasting helpers
pub mod broadcast;

/// WebSocket handler
pub mod socket;

// Re-export commonly used types and functions
pub use broadcast::{
    broadcast_comment_update, broadcast_message, broadcast_post_update, push_notification,
};
pub use registry::{ConnectionId, ConnectionRegistry, ConnectionSender};
pub use socket::handle_socket_upgrade;
