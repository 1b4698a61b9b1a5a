//! # Todo Server
//!
//! Bootstrap for the todo REST service: configuration, the application
//! router with CORS, the Prometheus scrape endpoint and shutdown signalling.
//!
//! The `todo-server` binary wires these to a PostgreSQL repository.

pub mod config;

pub use config::{Config, DatabaseConfig, ServerConfig};

use axum::{Router, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use todo_core::TodoRepository;
use todo_web::{AppState, build_router};
use tower_http::cors::CorsLayer;

/// The API router over `repository`, open to cross-origin browser clients.
pub fn build_app<R>(repository: R) -> Router
where
    R: TodoRepository + 'static,
{
    build_router(AppState::new(repository)).layer(CorsLayer::permissive())
}

/// Router serving `GET /metrics` in the Prometheus text format.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    )
}

/// Resolves on Ctrl+C (or SIGTERM on Unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(error) => {
                tracing::error!(%error, "Unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
