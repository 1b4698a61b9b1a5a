//! In-memory implementations of the storage and remote API boundaries.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use todo_core::{
    ApiError, Operation, RepositoryError, TodoApi, TodoDraft, TodoId, TodoItem, TodoRepository,
};

#[derive(Debug)]
struct Table {
    items: BTreeMap<TodoId, TodoItem>,
    next_id: i64,
    unavailable: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
            unavailable: false,
        }
    }
}

/// In-memory todo repository.
///
/// Ids start at 1 and increase by one per created item, like a serial
/// column. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<Mutex<Table>>,
}

impl InMemoryTodoRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `items`; new ids continue after the highest one.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut table = Table::default();
        for item in items {
            table.next_id = table.next_id.max(item.id.value() + 1);
            table.items.insert(item.id, item);
        }
        Self {
            table: Arc::new(Mutex::new(table)),
        }
    }

    /// Make every call fail with a database error until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut table) = self.table.lock() {
            table.unavailable = unavailable;
        }
    }

    /// Current contents, ascending by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.table
            .lock()
            .map(|table| table.items.values().cloned().collect())
            .unwrap_or_default()
    }

    fn with_table<T>(
        &self,
        f: impl FnOnce(&mut Table) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut table = self
            .table
            .lock()
            .map_err(|_| RepositoryError::Database("table lock poisoned".to_string()))?;
        if table.unavailable {
            return Err(RepositoryError::Database("database unavailable".to_string()));
        }
        f(&mut table)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, RepositoryError>> + Send {
        let result = self.with_table(|table| Ok(table.items.values().cloned().collect()));
        async move { result }
    }

    fn get(
        &self,
        id: TodoId,
    ) -> impl Future<Output = Result<Option<TodoItem>, RepositoryError>> + Send {
        let result = self.with_table(|table| Ok(table.items.get(&id).cloned()));
        async move { result }
    }

    fn create(
        &self,
        draft: TodoDraft,
    ) -> impl Future<Output = Result<TodoItem, RepositoryError>> + Send {
        let result = self.with_table(|table| {
            let id = TodoId::new(table.next_id);
            table.next_id += 1;
            let item = draft.into_item(id);
            table.items.insert(id, item.clone());
            Ok(item)
        });
        async move { result }
    }

    fn update(
        &self,
        item: TodoItem,
    ) -> impl Future<Output = Result<TodoItem, RepositoryError>> + Send {
        let result = self.with_table(|table| match table.items.get_mut(&item.id) {
            Some(existing) => {
                existing.name.clone_from(&item.name);
                existing.is_complete = item.is_complete;
                Ok(existing.clone())
            },
            None => Err(RepositoryError::NotFound(item.id)),
        });
        async move { result }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let result = self.with_table(|table| {
            table
                .items
                .remove(&id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound(id))
        });
        async move { result }
    }

    fn ping(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let result = self.with_table(|_| Ok(()));
        async move { result }
    }
}

#[derive(Debug, Default)]
struct Control {
    failures: HashMap<Operation, u16>,
    delays: HashMap<Operation, VecDeque<Duration>>,
    calls: Vec<Operation>,
}

/// In-memory stand-in for the remote todo service.
///
/// Behaves like the HTTP service over an [`InMemoryTodoRepository`]:
/// missing items are 404s, blank names are 422s. Failures and per-call
/// latency can be injected per [`Operation`]; every attempted call is
/// recorded. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoApi {
    backend: InMemoryTodoRepository,
    control: Arc<Mutex<Control>>,
}

impl InMemoryTodoApi {
    /// An API with no items.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An API already holding `todos`.
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = TodoItem>) -> Self {
        Self {
            backend: InMemoryTodoRepository::with_items(todos),
            control: Arc::default(),
        }
    }

    /// The repository behind this API.
    #[must_use]
    pub const fn backend(&self) -> &InMemoryTodoRepository {
        &self.backend
    }

    /// Server-side contents, ascending by id.
    #[must_use]
    pub fn todos(&self) -> Vec<TodoItem> {
        self.backend.snapshot()
    }

    /// Answer every `operation` call with `status` until [`recover`](Self::recover).
    pub fn fail(&self, operation: Operation, status: u16) {
        if let Ok(mut control) = self.control.lock() {
            control.failures.insert(operation, status);
        }
    }

    /// Stop failing `operation`.
    pub fn recover(&self, operation: Operation) {
        if let Ok(mut control) = self.control.lock() {
            control.failures.remove(&operation);
        }
    }

    /// Delay the next `operation` call by `delay`. Queued delays apply in order.
    pub fn delay_next(&self, operation: Operation, delay: Duration) {
        if let Ok(mut control) = self.control.lock() {
            control.delays.entry(operation).or_default().push_back(delay);
        }
    }

    /// Every attempted call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Operation> {
        self.control
            .lock()
            .map(|control| control.calls.clone())
            .unwrap_or_default()
    }

    /// How many times `operation` was attempted.
    #[must_use]
    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }

    /// Record the call, then report the injected delay and failure, if any.
    fn begin(&self, operation: Operation) -> (Option<Duration>, Option<u16>) {
        let Ok(mut control) = self.control.lock() else {
            return (None, Some(500));
        };
        control.calls.push(operation);
        let delay = control
            .delays
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        (delay, control.failures.get(&operation).copied())
    }

    async fn call<T, F, Fut>(&self, operation: Operation, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(InMemoryTodoRepository) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let (delay, failure) = self.begin(operation);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = failure {
            return Err(ApiError::Status { operation, status });
        }
        f(self.backend.clone()).await
    }
}

fn status_error(operation: Operation, error: &RepositoryError) -> ApiError {
    let status = match error {
        RepositoryError::NotFound(_) => 404,
        RepositoryError::Database(_) => 500,
    };
    ApiError::Status { operation, status }
}

impl TodoApi for InMemoryTodoApi {
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, ApiError>> + Send {
        let this = self.clone();
        async move {
            let operation = Operation::FetchTodos;
            this.call(operation, |backend| async move {
                backend.list().await.map_err(|e| status_error(operation, &e))
            })
            .await
        }
    }

    fn get(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, ApiError>> + Send {
        let this = self.clone();
        async move {
            let operation = Operation::FetchTodo;
            this.call(operation, |backend| async move {
                backend
                    .get(id)
                    .await
                    .map_err(|e| status_error(operation, &e))?
                    .ok_or(ApiError::Status {
                        operation,
                        status: 404,
                    })
            })
            .await
        }
    }

    fn create(&self, draft: TodoDraft) -> impl Future<Output = Result<TodoItem, ApiError>> + Send {
        let this = self.clone();
        async move {
            let operation = Operation::CreateTodo;
            this.call(operation, |backend| async move {
                if draft.validate().is_err() {
                    return Err(ApiError::Status {
                        operation,
                        status: 422,
                    });
                }
                backend
                    .create(draft)
                    .await
                    .map_err(|e| status_error(operation, &e))
            })
            .await
        }
    }

    fn update(&self, todo: TodoItem) -> impl Future<Output = Result<(), ApiError>> + Send {
        let this = self.clone();
        async move {
            let operation = Operation::SaveTodo;
            this.call(operation, |backend| async move {
                if todo.validate().is_err() {
                    return Err(ApiError::Status {
                        operation,
                        status: 422,
                    });
                }
                backend
                    .update(todo)
                    .await
                    .map(|_| ())
                    .map_err(|e| status_error(operation, &e))
            })
            .await
        }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send {
        let this = self.clone();
        async move {
            let operation = Operation::DeleteTodo;
            this.call(operation, |backend| async move {
                backend
                    .delete(id)
                    .await
                    .map_err(|e| status_error(operation, &e))
            })
            .await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn repository_assigns_increasing_ids() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.create(TodoDraft::new("one")).await.unwrap();
        let second = repo.create(TodoDraft::new("two")).await.unwrap();
        assert_eq!(first.id, TodoId::new(1));
        assert_eq!(second.id, TodoId::new(2));
    }

    #[tokio::test]
    async fn repository_continues_after_seeded_ids() {
        let repo = InMemoryTodoRepository::with_items(fixtures::sample_todos());
        let created = repo.create(TodoDraft::new("four")).await.unwrap();
        assert_eq!(created.id, TodoId::new(4));
        assert_eq!(repo.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn repository_reports_missing_items() {
        let repo = InMemoryTodoRepository::new();
        let missing = TodoId::new(9);
        assert_eq!(repo.get(missing).await.unwrap(), None);
        assert_eq!(
            repo.delete(missing).await,
            Err(RepositoryError::NotFound(missing))
        );
        assert_eq!(
            repo.update(fixtures::todo(9, "x", false)).await,
            Err(RepositoryError::NotFound(missing))
        );
    }

    #[tokio::test]
    async fn unavailable_repository_fails_ping() {
        let repo = InMemoryTodoRepository::new();
        repo.set_unavailable(true);
        assert!(matches!(repo.ping().await, Err(RepositoryError::Database(_))));
        repo.set_unavailable(false);
        assert!(repo.ping().await.is_ok());
    }

    #[tokio::test]
    async fn api_records_calls_and_injects_failures() {
        let api = InMemoryTodoApi::with_todos(fixtures::sample_todos());
        api.fail(Operation::FetchTodos, 503);

        let err = api.list().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                operation: Operation::FetchTodos,
                status: 503
            }
        );

        api.recover(Operation::FetchTodos);
        assert_eq!(api.list().await.unwrap().len(), 3);
        assert_eq!(api.call_count(Operation::FetchTodos), 2);
    }

    #[tokio::test]
    async fn api_maps_missing_items_to_404() {
        let api = InMemoryTodoApi::new();
        let err = api.get(TodoId::new(1)).await.unwrap_err();
        assert!(err.is_not_found());
        let err = api.delete(TodoId::new(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
