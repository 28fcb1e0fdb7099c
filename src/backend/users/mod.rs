//! Users Module
//!
//! The user directory: listing, search, profiles, profile edits and the
//! follower/following lists.
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! └── handlers.rs - HTTP handlers
//! ```

/// Request and response types
pub mod types;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    get_profile, list_followers, list_following, list_users, search_users, update_user,
};
