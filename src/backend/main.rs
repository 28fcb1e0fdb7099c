/**
 * socialhub Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the layered configuration and
 * serves the Axum application.
 */
use socialhub::backend::server::{create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // Initialize tracing, INFO by default
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = ServerConfig::load()?;
    let port = config.port;
    tracing::info!(
        "[STARTUP] Data directory {}, static directory {}",
        config.data_dir.display(),
        config.static_dir.display()
    );

    // Create the Axum app
    let app = create_app(config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[STARTUP] Listening on http://{}", addr);

    // Run the server
    axum::serve(listener, app).await?;

    Ok(())
}
