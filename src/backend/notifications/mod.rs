//! Notifications Module
//!
//! Notifications are created when someone follows a user, likes or comments
//! on their post, or sends them a direct message. Self-likes and
//! self-comments do not notify.
//!
//! # Module Structure
//!
//! ```text
//! notifications/
//! ├── mod.rs      - Module exports
//! ├── service.rs  - Creation and real-time push
//! └── handlers.rs - HTTP handlers
//! ```

/// Creation and real-time push
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use handlers::{clear_notifications, list_notifications, mark_notification_read};
pub use service::{actor_name, create_notification, notify};
