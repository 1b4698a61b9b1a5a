//! Axum REST API for todo items.
//!
//! A thin shell over a [`TodoRepository`](todo_core::TodoRepository): handlers
//! parse the request, call the repository and map the result to a response.
//!
//! # Request Flow
//!
//! 1. **Correlation id** attached by [`middleware::correlation_id_layer`]
//! 2. **Extract** path id and JSON body
//! 3. **Validate** the name (blank names are a 422)
//! 4. **Call** the repository
//! 5. **Map** the result or [`AppError`] to a response
//!
//! # Example
//!
//! ```ignore
//! use todo_web::{build_router, AppState};
//!
//! let app = build_router(AppState::new(repository));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
