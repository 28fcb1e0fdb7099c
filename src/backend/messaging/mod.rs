//! Messaging Module
//!
//! Direct messages between two users and the per-counterpart conversation
//! list. New messages are pushed to the recipient's open sockets and raise a
//! `message` notification.
//!
//! # Module Structure
//!
//! ```text
//! messaging/
//! ├── mod.rs           - Module exports
//! ├── types.rs         - Request and response types
//! ├── handlers.rs      - Send, read, retract and like
//! └── conversations.rs - Conversation summaries
//! ```

/// Request and response types
pub mod types;

/// HTTP handlers
pub mod handlers;

/// Conversation summaries
pub mod conversations;

pub use conversations::{list_conversations, summarize_conversations};
pub use handlers::{
    get_messages, mark_message_read, retract_message, send_message, toggle_message_like,
};
