//! Client state and the actions that change it.

use std::fmt;
use todo_core::{ApiError, TodoDraft, TodoId, TodoItem, TodoLists};
use uuid::Uuid;

/// Where a [`Resource`] is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Never requested.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed.
    Failed,
}

/// A remotely loaded value.
///
/// While a reload is in flight the previous value stays visible. A failed
/// load keeps the previous value too and records the error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource<T> {
    /// Last successfully loaded value.
    pub value: T,
    /// Current load status.
    pub status: LoadStatus,
    /// Error of the last load, cleared on success.
    pub error: Option<ApiError>,
}

impl<T> Resource<T> {
    /// Mark a load as started.
    pub fn loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Store a loaded value.
    pub fn resolve(&mut self, value: T) {
        self.value = value;
        self.status = LoadStatus::Ready;
        self.error = None;
    }

    /// Record a failed load.
    pub fn fail(&mut self, error: ApiError) {
        self.status = LoadStatus::Failed;
        self.error = Some(error);
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// Correlates a mutation command with its result action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the client knows about the todo collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodosState {
    /// The whole collection as last fetched.
    pub todos: Resource<Vec<TodoItem>>,
    /// The most recently created or updated item, if any.
    pub selected_id: Option<TodoId>,
    /// The selected item as last fetched.
    pub selected: Resource<Option<TodoItem>>,
    /// Message of the most recent failure.
    pub last_error: Option<String>,
}

impl TodosState {
    /// The active and completed views of the loaded collection.
    #[must_use]
    pub fn lists(&self) -> TodoLists {
        TodoLists::derive(&self.todos.value, self.selected_id)
    }

    /// The loaded selected item, if it is still the selection.
    #[must_use]
    pub fn selected_item(&self) -> Option<&TodoItem> {
        self.selected
            .value
            .as_ref()
            .filter(|todo| Some(todo.id) == self.selected_id)
    }
}

/// Commands sent by callers and results fed back by effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodosAction {
    // Commands
    /// Fetch the whole collection.
    Reload,
    /// Fetch the selected item.
    ReloadSelected,
    /// Change the selection and fetch the newly selected item.
    Select {
        /// New selection, `None` clears it.
        id: Option<TodoId>,
    },
    /// Create an item.
    Create {
        /// Caller correlation id.
        request_id: RequestId,
        /// Item to create.
        draft: TodoDraft,
    },
    /// Replace an item.
    Update {
        /// Caller correlation id.
        request_id: RequestId,
        /// New contents, including the id.
        todo: TodoItem,
    },
    /// Delete an item.
    Delete {
        /// Caller correlation id.
        request_id: RequestId,
        /// Item to delete.
        id: TodoId,
    },

    // Results
    /// The collection was fetched.
    TodosLoaded {
        /// Fetched items.
        todos: Vec<TodoItem>,
    },
    /// Fetching the collection failed.
    TodosLoadFailed {
        /// Why.
        error: ApiError,
    },
    /// The selected item was fetched, or there is no selection.
    SelectedLoaded {
        /// Fetched item.
        todo: Option<TodoItem>,
    },
    /// Fetching the selected item failed.
    SelectedLoadFailed {
        /// Why.
        error: ApiError,
    },
    /// An item was created.
    Created {
        /// Correlation id of the [`TodosAction::Create`].
        request_id: RequestId,
        /// The item with its assigned id.
        todo: TodoItem,
    },
    /// An item was replaced.
    Updated {
        /// Correlation id of the [`TodosAction::Update`].
        request_id: RequestId,
        /// The item as sent.
        todo: TodoItem,
    },
    /// An item was deleted.
    Deleted {
        /// Correlation id of the [`TodosAction::Delete`].
        request_id: RequestId,
        /// Deleted item.
        id: TodoId,
    },
    /// A create, update or delete was rejected.
    MutationFailed {
        /// Correlation id of the command.
        request_id: RequestId,
        /// Why.
        error: ApiError,
    },
}

impl TodosAction {
    /// Correlation id of a mutation command or result.
    #[must_use]
    pub const fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::Create { request_id, .. }
            | Self::Update { request_id, .. }
            | Self::Delete { request_id, .. }
            | Self::Created { request_id, .. }
            | Self::Updated { request_id, .. }
            | Self::Deleted { request_id, .. }
            | Self::MutationFailed { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    /// Whether this is the outcome of the mutation `request_id`.
    #[must_use]
    pub fn is_result_of(&self, request_id: RequestId) -> bool {
        matches!(
            self,
            Self::Created { .. }
                | Self::Updated { .. }
                | Self::Deleted { .. }
                | Self::MutationFailed { .. }
        ) && self.request_id() == Some(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::Operation;

    #[test]
    fn resource_keeps_value_while_reloading_and_on_failure() {
        let mut resource: Resource<Vec<i32>> = Resource::default();
        assert_eq!(resource.status, LoadStatus::Idle);

        resource.resolve(vec![1, 2]);
        resource.loading();
        assert!(resource.is_loading());
        assert_eq!(resource.value, vec![1, 2]);

        let error = ApiError::Status {
            operation: Operation::FetchTodos,
            status: 503,
        };
        resource.fail(error.clone());
        assert_eq!(resource.status, LoadStatus::Failed);
        assert_eq!(resource.value, vec![1, 2]);
        assert_eq!(resource.error, Some(error));

        resource.resolve(vec![3]);
        assert_eq!(resource.error, None);
    }

    #[test]
    fn results_match_only_their_own_request() {
        let mine = RequestId::new();
        let other = RequestId::new();
        let created = TodosAction::Created {
            request_id: mine,
            todo: TodoItem::new(TodoId::new(1), "x", false),
        };

        assert!(created.is_result_of(mine));
        assert!(!created.is_result_of(other));

        let command = TodosAction::Delete {
            request_id: mine,
            id: TodoId::new(1),
        };
        assert!(!command.is_result_of(mine));
        assert_eq!(TodosAction::Reload.request_id(), None);
    }

    #[test]
    fn selected_item_requires_matching_selection() {
        let todo = TodoItem::new(TodoId::new(4), "Pay rent", false);
        let mut state = TodosState::default();
        state.selected.resolve(Some(todo.clone()));

        assert_eq!(state.selected_item(), None);

        state.selected_id = Some(TodoId::new(4));
        assert_eq!(state.selected_item(), Some(&todo));
    }
}
