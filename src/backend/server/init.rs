/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, data directory preparation and route
 * configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Create missing collection files, seeding `users.json` with the admin
 * 2. Prime the id generator with the largest id already on disk
 * 3. Create the token and connection registries
 * 4. Create and configure the router
 *
 * Tokens live in memory only. After a restart clients re-activate their
 * stored token through `POST /api/auth/verify-token`.
 */
use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{IdGenerator, JsonStore, StoreError};

/// Build the shared application state
///
/// # Errors
///
/// Returns a `StoreError` if the data directory or a collection file cannot
/// be created or read.
pub async fn build_state(config: ServerConfig) -> Result<AppState, StoreError> {
    let store = JsonStore::new(&config.data_dir);
    store.init(config.admin_seed()).await?;

    let last_id = store.max_record_id().await?;
    let ids = IdGenerator::starting_after(last_id);

    tracing::info!(
        "Data directory {} ready (largest record id {})",
        store.dir().display(),
        last_id
    );

    Ok(AppState::new(store, ids, config))
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Fails only if the data directory cannot be prepared.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing socialhub backend server");

    let app_state = build_state(config).await?;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
