//! Prometheus metrics for observability and monitoring.
//!
//! This module describes the metrics recorded across the workspace:
//! - Store: actions, reducer timing, effects
//! - Repository: queries and their latency
//! - HTTP: todo item operations handled by the service
//! - Client: remote API calls and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_runtime::metrics::MetricsServer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.start()?;
//!
//! // Serve `server.render()` from a `/metrics` route
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use thiserror::Error;

pub use metrics::{counter, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus recorder plus the address its scrape endpoint is served on.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a new metrics server for `addr`.
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Address the scrape endpoint should listen on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Install the Prometheus recorder and describe all metrics.
    ///
    /// Installing twice in one process (common in tests) is tolerated; the
    /// second server then has no handle of its own.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] if the exporter cannot be built or installed.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                self.handle = Some(handle);
                tracing::info!(addr = %self.addr, "Metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// The Prometheus handle, if this server installed the recorder.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render metrics in the Prometheus text format.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

fn register_metrics() {
    describe_counter!("store.commands.total", "Actions sent to stores");
    describe_counter!("store.effects.executed", "Effects executed, labelled by type");
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken to reduce a single action"
    );

    describe_counter!(
        "todo_repository_queries_total",
        "Repository queries, labelled by operation"
    );
    describe_counter!(
        "todo_repository_errors_total",
        "Repository queries that failed, labelled by operation"
    );
    describe_histogram!(
        "todo_repository_query_duration_seconds",
        "Repository query latency, labelled by operation"
    );

    describe_counter!(
        "todo_items_requests_total",
        "Todo item HTTP requests, labelled by operation and outcome"
    );

    describe_counter!(
        "todo_api_requests_total",
        "Remote API calls made by clients, labelled by operation"
    );
    describe_counter!(
        "todo_api_failures_total",
        "Remote API calls that failed, labelled by operation"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_server_creation() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let server = MetricsServer::new(addr);
        assert!(server.handle().is_none());
        assert_eq!(server.addr(), addr);
    }

    #[test]
    fn test_metrics_server_render() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let mut server = MetricsServer::new(addr);
        server.start().unwrap();

        counter!("todo_repository_queries_total", "operation" => "list").increment(1);
        histogram!("store.reducer.duration_seconds").record(0.002);

        // Another test may have installed the recorder first
        if let Some(rendered) = server.render() {
            assert!(rendered.contains("todo_repository_queries_total"));
            assert!(rendered.contains("store_reducer_duration_seconds"));
        }
    }
}
