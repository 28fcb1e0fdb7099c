//! Storage Module
//!
//! Flat-file persistence: one JSON array per entity type, loaded and written
//! whole, plus the time-based id generator shared by every handler.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs        - Module exports
//! ├── json_store.rs - Collection files and read-modify-write cycles
//! └── ids.rs        - Time-based id generation
//! ```

/// Collection files and read-modify-write cycles
pub mod json_store;

/// Time-based id generation
pub mod ids;

pub use ids::IdGenerator;
pub use json_store::{AdminSeed, Collection, JsonStore, Record, StoreError};
