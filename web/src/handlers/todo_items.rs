//! Todo item CRUD endpoints.
//!
//! - `GET /api/TodoItems` - List all items, ascending by id
//! - `GET /api/TodoItems/:id` - Get one item
//! - `POST /api/TodoItems` - Create an item (201 with `Location`)
//! - `PUT /api/TodoItems/:id` - Replace an item (204)
//! - `DELETE /api/TodoItems/:id` - Delete an item (204)

use crate::WebResult;
use crate::error::AppError;
use crate::extractors::CorrelationId;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use todo_core::{TODO_ITEMS_PATH, TodoDraft, TodoId, TodoItem, TodoRepository};

/// Body of `PUT /api/TodoItems/:id`.
///
/// The `id` may be omitted; when present it must match the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItemRequest {
    /// Item id, must equal the path id when given
    #[serde(default)]
    pub id: Option<TodoId>,
    /// New name
    pub name: String,
    /// New completion state
    #[serde(default)]
    pub is_complete: bool,
}

fn record(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "todo_items_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// List all todo items.
///
/// ```bash
/// curl http://localhost:8080/api/TodoItems
/// ```
///
/// # Errors
///
/// 500 if the repository fails.
pub async fn list_todo_items<R>(
    State(state): State<AppState<R>>,
) -> WebResult<Json<Vec<TodoItem>>>
where
    R: TodoRepository + 'static,
{
    let todos = state.repository.list().await?;
    record("list", "ok");
    Ok(Json(todos))
}

/// Get a single todo item.
///
/// # Errors
///
/// 404 if there is no item with this id.
pub async fn get_todo_item<R>(
    Path(id): Path<TodoId>,
    State(state): State<AppState<R>>,
) -> WebResult<Json<TodoItem>>
where
    R: TodoRepository + 'static,
{
    match state.repository.get(id).await? {
        Some(todo) => {
            record("get", "ok");
            Ok(Json(todo))
        },
        None => {
            record("get", "not_found");
            Err(AppError::not_found("Todo item", id))
        },
    }
}

/// Create a todo item.
///
/// Any `id` in the body is ignored; the repository assigns one.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/TodoItems \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Buy milk", "isComplete": false}'
/// ```
///
/// # Errors
///
/// 422 for a blank name, 4xx for a malformed body.
pub async fn create_todo_item<R>(
    correlation_id: CorrelationId,
    State(state): State<AppState<R>>,
    body: Result<Json<TodoDraft>, JsonRejection>,
) -> WebResult<Response>
where
    R: TodoRepository + 'static,
{
    let Json(draft) = body?;
    draft.validate()?;

    let todo = state.repository.create(draft).await?;
    record("create", "created");
    tracing::info!(
        correlation_id = %correlation_id.0,
        todo_id = %todo.id,
        "Todo item created"
    );

    let location = format!("{TODO_ITEMS_PATH}/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)).into_response())
}

/// Replace a todo item's name and completion state.
///
/// # Errors
///
/// 400 when the body id differs from the path, 404 when the item does not
/// exist, 422 for a blank name.
pub async fn update_todo_item<R>(
    correlation_id: CorrelationId,
    Path(id): Path<TodoId>,
    State(state): State<AppState<R>>,
    body: Result<Json<UpdateTodoItemRequest>, JsonRejection>,
) -> WebResult<StatusCode>
where
    R: TodoRepository + 'static,
{
    let Json(request) = body?;

    if let Some(body_id) = request.id {
        if body_id != id {
            record("update", "id_mismatch");
            return Err(AppError::bad_request(format!(
                "Body id {body_id} does not match path id {id}"
            )));
        }
    }

    let todo = TodoItem::new(id, request.name, request.is_complete);
    todo.validate()?;

    state.repository.update(todo).await?;
    record("update", "ok");
    tracing::info!(correlation_id = %correlation_id.0, todo_id = %id, "Todo item updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a todo item.
///
/// # Errors
///
/// 404 when the item does not exist.
pub async fn delete_todo_item<R>(
    correlation_id: CorrelationId,
    Path(id): Path<TodoId>,
    State(state): State<AppState<R>>,
) -> WebResult<StatusCode>
where
    R: TodoRepository + 'static,
{
    state.repository.delete(id).await?;
    record("delete", "ok");
    tracing::info!(correlation_id = %correlation_id.0, todo_id = %id, "Todo item deleted");

    Ok(StatusCode::NO_CONTENT)
}
