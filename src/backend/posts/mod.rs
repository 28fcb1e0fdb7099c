//! Posts Module
//!
//! Posts, the personalized feed, likes and comments.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── handlers.rs - Post CRUD
//! ├── feed.rs     - Feed assembly
//! ├── likes.rs    - Like and unlike
//! └── comments.rs - Comment create, list and delete
//! ```

/// Request and response types
pub mod types;

/// Post CRUD
pub mod handlers;

/// Feed assembly
pub mod feed;

/// Like and unlike
pub mod likes;

/// Comments
pub mod comments;

pub use comments::{create_comment, delete_comment, list_comments};
pub use feed::get_feed;
pub use handlers::{create_post, delete_post, list_posts, update_post};
pub use likes::{like_post, unlike_post};
