//! [`TodosService`], the client façade over the store.

use crate::config::DEFAULT_RESPONSE_WAIT;
use crate::reducer::{TodosEnvironment, TodosReducer};
use crate::state::{RequestId, TodosAction, TodosState};
use crate::view::TodosPage;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use todo_core::{ApiError, TodoApi, TodoDraft, TodoId, TodoItem, TodoLists};
use todo_runtime::{Store, StoreError};

/// Why a service call failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The operation was rejected, locally or by the service.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The store could not run the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A mutation resolved to an action of the wrong kind.
    #[error("Unexpected result action: {0}")]
    UnexpectedAction(String),
}

type TodosStore<A> = Store<TodosState, TodosAction, TodosEnvironment<A>, TodosReducer<A>>;

/// Lists, creates, saves and deletes todos through a [`TodoApi`].
///
/// Mutations resolve as soon as their result is known; the reloads they
/// trigger keep running in the background. Use [`settle`](Self::settle) to
/// wait for them.
pub struct TodosService<A: TodoApi + 'static> {
    store: TodosStore<A>,
    response_wait: Duration,
}

impl<A: TodoApi + 'static> Clone for TodosService<A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            response_wait: self.response_wait,
        }
    }
}

impl<A: TodoApi + 'static> TodosService<A> {
    /// Create a service with empty state
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::from_arc(Arc::new(api))
    }

    /// Create a service sharing an API client
    #[must_use]
    pub fn from_arc(api: Arc<A>) -> Self {
        Self {
            store: Store::new(
                TodosState::default(),
                TodosReducer::new(),
                TodosEnvironment::from_arc(api),
            ),
            response_wait: DEFAULT_RESPONSE_WAIT,
        }
    }

    /// Bound how long callers wait for results
    #[must_use]
    pub const fn with_response_wait(mut self, response_wait: Duration) -> Self {
        self.response_wait = response_wait;
        self
    }

    /// Fetch the collection and the selected item.
    ///
    /// # Errors
    ///
    /// The load error of the collection, or a store failure.
    pub async fn load(&self) -> Result<(), ClientError> {
        let mut todos = self.store.send(TodosAction::Reload).await?;
        let mut selected = self.store.send(TodosAction::ReloadSelected).await?;
        todos.wait_with_timeout(self.response_wait).await?;
        selected.wait_with_timeout(self.response_wait).await?;

        match self.store.state(|s| s.todos.error.clone()).await {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    /// Create an item and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with a validation error for a blank name, or
    /// "Failed to create new todo".
    pub async fn create_todo(&self, draft: TodoDraft) -> Result<TodoItem, ClientError> {
        let request_id = RequestId::new();
        match self
            .mutate(request_id, TodosAction::Create { request_id, draft })
            .await?
        {
            TodosAction::Created { todo, .. } => Ok(todo),
            other => Err(unexpected(&other)),
        }
    }

    /// Replace an item's name and completion state.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with a validation error for a blank name, or
    /// "Failed to save todo".
    pub async fn update_todo(&self, todo: TodoItem) -> Result<(), ClientError> {
        let request_id = RequestId::new();
        match self
            .mutate(request_id, TodosAction::Update { request_id, todo })
            .await?
        {
            TodosAction::Updated { .. } => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with "Failed to delete todo".
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ClientError> {
        let request_id = RequestId::new();
        match self
            .mutate(request_id, TodosAction::Delete { request_id, id })
            .await?
        {
            TodosAction::Deleted { .. } => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// Change the selection and wait for the selected item to load.
    ///
    /// # Errors
    ///
    /// A store failure or timeout.
    pub async fn select(&self, id: Option<TodoId>) -> Result<(), ClientError> {
        let mut handle = self.store.send(TodosAction::Select { id }).await?;
        handle.wait_with_timeout(self.response_wait).await?;
        Ok(())
    }

    /// Wait for every in-flight request, including background reloads.
    ///
    /// # Errors
    ///
    /// [`StoreError::SettleTimeout`] if requests are still running after the
    /// response wait.
    pub async fn settle(&self) -> Result<(), ClientError> {
        self.store.settle(self.response_wait).await?;
        Ok(())
    }

    /// Stop accepting commands and wait for in-flight requests.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] if requests are still running after the
    /// response wait.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.store.shutdown(self.response_wait).await?;
        Ok(())
    }

    /// The loaded collection, ascending by id as the service returns it.
    pub async fn todos(&self) -> Vec<TodoItem> {
        self.store.state(|s| s.todos.value.clone()).await
    }

    /// The active and completed views.
    pub async fn lists(&self) -> TodoLists {
        self.store.state(TodosState::lists).await
    }

    /// Current selection.
    pub async fn selected_id(&self) -> Option<TodoId> {
        self.store.state(|s| s.selected_id).await
    }

    /// The selected item as last loaded.
    pub async fn selected(&self) -> Option<TodoItem> {
        self.store.state(|s| s.selected.value.clone()).await
    }

    /// Message of the most recent failure.
    pub async fn last_error(&self) -> Option<String> {
        self.store.state(|s| s.last_error.clone()).await
    }

    /// Snapshot of the whole state.
    pub async fn snapshot(&self) -> TodosState {
        self.store.state(Clone::clone).await
    }

    /// Render model of the current state.
    pub async fn page(&self) -> TodosPage {
        self.store.state(TodosPage::from_state).await
    }

    async fn mutate(
        &self,
        request_id: RequestId,
        command: TodosAction,
    ) -> Result<TodosAction, ClientError> {
        let result = self
            .store
            .send_and_wait_for(
                command,
                |action| action.is_result_of(request_id),
                self.response_wait,
            )
            .await?;

        match result {
            TodosAction::MutationFailed { error, .. } => Err(error.into()),
            result => Ok(result),
        }
    }
}

fn unexpected(action: &TodosAction) -> ClientError {
    ClientError::UnexpectedAction(format!("{action:?}"))
}
