//! Remote boundary used by clients of the todo service.

use crate::model::{TodoDraft, TodoId, TodoItem, ValidationError};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Path of the todo item collection, relative to the service root.
pub const TODO_ITEMS_PATH: &str = "/api/TodoItems";

/// The remote operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetching the whole collection.
    FetchTodos,
    /// Fetching one item.
    FetchTodo,
    /// Creating an item.
    CreateTodo,
    /// Saving changes to an item.
    SaveTodo,
    /// Deleting an item.
    DeleteTodo,
}

impl Operation {
    /// The message shown to users when this operation fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::FetchTodos => "Failed to fetch todos",
            Self::FetchTodo => "Failed to fetch todo",
            Self::CreateTodo => "Failed to create new todo",
            Self::SaveTodo => "Failed to save todo",
            Self::DeleteTodo => "Failed to delete todo",
        }
    }

    /// Short machine-friendly name, used as a metrics label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchTodos => "fetch_todos",
            Self::FetchTodo => "fetch_todo",
            Self::CreateTodo => "create_todo",
            Self::SaveTodo => "save_todo",
            Self::DeleteTodo => "delete_todo",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Why a remote operation failed.
///
/// Every variant displays a generic, human-readable message. The underlying
/// detail is kept for logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The input was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never produced a response.
    #[error("{operation}")]
    Transport {
        /// Operation that failed.
        operation: Operation,
        /// Underlying transport error.
        detail: String,
    },

    /// The server answered with a non-success status.
    #[error("{operation}")]
    Status {
        /// Operation that failed.
        operation: Operation,
        /// HTTP status code received.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("{operation}")]
    Decode {
        /// Operation that failed.
        operation: Operation,
        /// Underlying decode error.
        detail: String,
    },
}

impl ApiError {
    /// The operation this error belongs to, if a request was attempted.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Validation(_) => None,
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
        }
    }

    /// Whether the server reported the item as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Client view of the todo service.
///
/// `todo-client` implements this over HTTP; `todo-testing` provides an
/// in-memory implementation with failure injection.
pub trait TodoApi: Send + Sync {
    /// Fetch every item.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, ApiError>> + Send;

    /// Fetch one item.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure; a missing item is a 404 status.
    fn get(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, ApiError>> + Send;

    /// Create an item and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    fn create(&self, draft: TodoDraft) -> impl Future<Output = Result<TodoItem, ApiError>> + Send;

    /// Replace an item.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    fn update(&self, todo: TodoItem) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_generic_operation_message() {
        let err = ApiError::Status {
            operation: Operation::CreateTodo,
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to create new todo");

        let err = ApiError::Transport {
            operation: Operation::FetchTodos,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch todos");
        assert_eq!(err.operation(), Some(Operation::FetchTodos));
    }

    #[test]
    fn validation_errors_have_no_operation() {
        let err = ApiError::from(ValidationError::BlankName);
        assert_eq!(err.to_string(), "Todo name must not be blank");
        assert_eq!(err.operation(), None);
    }

    #[test]
    fn not_found_is_detected_from_status() {
        let err = ApiError::Status {
            operation: Operation::FetchTodo,
            status: 404,
        };
        assert!(err.is_not_found());
        assert!(!ApiError::from(ValidationError::BlankName).is_not_found());
    }
}
