//! Shared Module
//!
//! This module contains the records and frames that cross a boundary: JSON
//! collections on disk, REST bodies and WebSocket frames.

/// Entity records
pub mod models;

/// Real-time socket frames
pub mod event;

/// Shared error types
pub mod error;

/// REST response shapes shared by several endpoints
pub mod api;

/// Re-export commonly used types for convenience
pub use api::{MessageResponse, SessionUser, UserCard, UserSummary};
pub use error::SharedError;
pub use event::{ClientFrame, ServerEvent, UpdateAction};
pub use models::{
    Comment, Follow, Like, Message, Notification, NotificationKind, Post, RecordId, User, UserId,
};
