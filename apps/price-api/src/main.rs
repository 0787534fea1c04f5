//! # Vitrina Price API
//!
//! HTTP server answering catalog and best-promotion queries.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Price API Server                                │
//! │                                                                         │
//! │  Storefront ───► HTTP (8080) ───► Services ───► SQLite (WAL)           │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                               vitrina-core engine                       │
//! │                                  (pure, sync)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use price_api::{build_router, ApiConfig, AppState};
use vitrina_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Vitrina price API...");

    // Load configuration
    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr(),
        database = %config.database_path,
        policy = ?config.policy(),
        "Configuration loaded"
    );

    // Open database (migrations run on connect)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.max_connections),
    )
    .await
    .context("opening database")?;
    info!("Database ready");

    let app = build_router(AppState::new(db.clone(), config.policy()));

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "Listening for HTTP requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
