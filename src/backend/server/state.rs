/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The JSON collection store
 * - The time-based id generator
 * - The active token registry
 * - The WebSocket connection registry
 * - The server configuration
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and shares its contents:
 * - `Arc<JsonStore>` serializes read-modify-write cycles per collection
 * - `TokenRegistry` and `ConnectionRegistry` wrap `Arc`-shared locked maps
 *
 * # Example
 *
 * ```rust,no_run
 * use socialhub::backend::server::state::AppState;
 * use socialhub::shared::Post;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let posts: Vec<Post> = state.store.load().await.unwrap_or_default();
 *     // ...
 * }
 * ```
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::tokens::TokenRegistry;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::{IdGenerator, JsonStore};

/// Application state shared by every handler
///
/// # Fields
///
/// * `store` - Flat-file collections
/// * `ids` - Id source for new records
/// * `tokens` - Active bearer tokens
/// * `connections` - Open WebSocket connections
/// * `config` - Server configuration
#[derive(Clone)]
pub struct AppState {
    /// Flat-file collections
    pub store: Arc<JsonStore>,

    /// Id source for every new record
    ///
    /// Primed with the largest id on disk at startup.
    pub ids: Arc<IdGenerator>,

    /// Active bearer tokens
    pub tokens: TokenRegistry,

    /// Open WebSocket connections
    pub connections: ConnectionRegistry,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: JsonStore, ids: IdGenerator, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            ids: Arc::new(ids),
            tokens: TokenRegistry::new(),
            connections: ConnectionRegistry::new(),
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for the store
///
/// This allows handlers that only touch collections to extract
/// `State(Arc<JsonStore>)`.
impl FromRef<AppState> for Arc<JsonStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Implement FromRef for TokenRegistry
impl FromRef<AppState> for TokenRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Implement FromRef for ConnectionRegistry
impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.connections.clone()
    }
}

/// Implement FromRef for the configuration
impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
