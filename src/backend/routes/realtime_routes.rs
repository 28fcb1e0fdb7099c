/**
 * Real-time Routes
 *
 * - `GET /ws` - WebSocket upgrade; optional `?token=` authenticates at connect
 */
use axum::{routing::get, Router};

use crate::backend::realtime::handle_socket_upgrade;
use crate::backend::server::state::AppState;

/// Configure the WebSocket route
pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/ws", get(handle_socket_upgrade))
}
