//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, middleware and static fallback
//! - **`realtime_routes`** - The WebSocket endpoint
//! - **`api_routes`** - REST endpoints under `/api`
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and documentation
//! ├── router.rs          - Main router creation
//! ├── realtime_routes.rs - WebSocket route
//! └── api_routes.rs      - API endpoint routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use socialhub::backend::routes::create_router;
//! use socialhub::backend::server::{build_state, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = build_state(ServerConfig::default()).await?;
//! let router = create_router(state);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// WebSocket route
pub mod realtime_routes;

/// API endpoint routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
