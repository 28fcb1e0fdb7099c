//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Layered configuration (defaults, TOML file, environment)
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig and ConfigError
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load()`
//! 2. **Store Initialization**: Creates missing collection files, seeds the admin
//! 3. **Id Priming**: Starts the id generator above the largest id on disk
//! 4. **Router Creation**: Configures all routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use socialhub::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app};
pub use state::AppState;

/// Fixtures for handler unit tests
#[cfg(test)]
pub(crate) mod testing;
