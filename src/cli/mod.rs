//! CLI module for the dashboard server.
//!
//! This module provides the `research-dash serve` command implementation.

mod config;
mod handlers;
mod state;

pub use config::{AnimationSettings, Config, ConfigError, DataConfig, ServerConfig};
pub use handlers::AppError;
pub use state::AppState;

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the dashboard router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/charts", get(handlers::get_charts))
        .route(crate::page::STREAM_PATH, get(handlers::metrics_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the dashboard server with the given configuration
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Starting research dashboard on {}", addr);
    tracing::info!(
        "Configuration: data={}, tick_ms={}, steps={}",
        config.data.path.display(),
        config.animation.tick_ms,
        config.animation.steps
    );
    if !config.data.path.exists() {
        tracing::warn!(
            path = %config.data.path.display(),
            "Metrics file not found; page renders will fail until it exists"
        );
    }
    tracing::info!("Dashboard page: /");
    tracing::info!("Snapshot endpoint: /api/dashboard");
    tracing::info!("Card animation stream: {}", crate::page::STREAM_PATH);

    let app = router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
