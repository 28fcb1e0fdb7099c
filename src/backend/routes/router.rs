/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Real-time routes (`/ws`)
 * 2. API routes (`/api/...`)
 * 3. Fallback: files from the configured static directory
 *
 * # Middleware
 *
 * Applied to every route, outermost first:
 * - `TraceLayer` - request/response tracing
 * - `CorsLayer::permissive()` - any origin, method and header
 * - `DefaultBodyLimit` - request body cap from `body_limit_bytes`
 */
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Shared application state
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Fallback
///
/// Paths not matched by a route are looked up in the static directory;
/// missing files answer 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();
    let body_limit = app_state.config.body_limit_bytes;

    // Start with the socket endpoint
    let router = configure_realtime_routes(Router::new());

    // Add API routes
    let router = configure_api_routes(router);

    // Static files for everything else
    let router = router.fallback_service(ServeDir::new(static_dir));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}
