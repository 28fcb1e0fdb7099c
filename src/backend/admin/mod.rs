//! Admin Module
//!
//! Account maintenance for administrators.
//!
//! # Module Structure
//!
//! ```text
//! admin/
//! ├── mod.rs      - Module exports
//! ├── purge.rs    - Cascading removal of users and their data
//! └── handlers.rs - HTTP handlers
//! ```

/// Cascading user removal
pub mod purge;

/// HTTP handlers
pub mod handlers;

pub use handlers::{clear_all, delete_user, list_all_users};
pub use purge::{purge_users, PurgeSummary};
