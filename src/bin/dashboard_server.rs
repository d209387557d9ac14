// Dashboard server binary entry point
//
// Purpose: Load the two semester CSV files and serve the posture dashboard
// Usage: DATA_DIR=./data cargo run --bin dashboard_server

use posture_dashboard::{create_router, AppState, DashboardConfig};
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
                    "posture_dashboard=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dashboard server...");

    let config = DashboardConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!("  SEMESTER1_FILE: {}", config.semester1_file);
    tracing::info!("  SEMESTER2_FILE: {}", config.semester2_file);
    tracing::info!("  PORT: {}", config.port);

    // Load survey data once; failures are reported on the page
    let state = AppState::new(&config).await?;

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
