// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the processed Olympics dataset
// Usage: cargo run --features api --bin api_server

use olympics_analytics::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "olympics_analytics=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {:?}", config.data_dir);
    tracing::info!("  ATHLETES_FILE: {}", config.athletes_file);
    tracing::info!("  REGIONS_FILE: {}", config.regions_file);
    tracing::info!("  SEASON: {:?}", config.preprocess.season);
    tracing::info!("  NOC overrides: {}", config.preprocess.noc_overrides.len());
    tracing::info!("  PORT: {}", config.port);

    // Load and preprocess on the blocking pool (CSV parsing is CPU-bound)
    tracing::info!("Initializing application state...");
    let state_config = config.clone();
    let state = tokio::task::spawn_blocking(move || AppState::new(&state_config)).await??;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
