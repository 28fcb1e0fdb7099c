//! Follows Module
//!
//! The follow graph: who follows whom. Follower and following lists are
//! served by the users module.

/// HTTP handlers
pub mod handlers;

pub use handlers::{follow_user, unfollow_user};
