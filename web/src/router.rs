//! Router configuration.

use crate::handlers::{health, todo_items};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{Router, routing::get};
use todo_core::TodoRepository;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /health`, `GET /ready`
/// - `/api/TodoItems` CRUD
///
/// Every request is traced and carries a correlation id.
pub fn build_router<R>(state: AppState<R>) -> Router
where
    R: TodoRepository + 'static,
{
    let api_routes = Router::new()
        .route(
            "/TodoItems",
            get(todo_items::list_todo_items::<R>).post(todo_items::create_todo_item::<R>),
        )
        .route(
            "/TodoItems/:id",
            get(todo_items::get_todo_item::<R>)
                .put(todo_items::update_todo_item::<R>)
                .delete(todo_items::delete_todo_item::<R>),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check::<R>))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
