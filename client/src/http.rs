//! [`TodoApi`] over HTTP with `reqwest`.

use crate::config::ClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use todo_core::{ApiError, Operation, TODO_ITEMS_PATH, TodoApi, TodoDraft, TodoId, TodoItem};

/// HTTP client for the todo service.
///
/// Any non-2xx status is a failure of the operation. No timeouts or
/// retries are applied.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the service at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{TODO_ITEMS_PATH}", self.base_url)
    }

    fn item_url(&self, id: TodoId) -> String {
        format!("{}{TODO_ITEMS_PATH}/{id}", self.base_url)
    }

    async fn execute(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        metrics::counter!("todo_api_requests_total", "operation" => operation.as_str())
            .increment(1);

        let result = match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(ApiError::Status {
                operation,
                status: response.status().as_u16(),
            }),
            Err(error) => Err(ApiError::Transport {
                operation,
                detail: error.to_string(),
            }),
        };

        if let Err(error) = &result {
            record_failure(operation, error);
        }
        result
    }

    async fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|error| {
            let error = ApiError::Decode {
                operation,
                detail: error.to_string(),
            };
            record_failure(operation, &error);
            error
        })
    }
}

fn record_failure(operation: Operation, error: &ApiError) {
    metrics::counter!("todo_api_failures_total", "operation" => operation.as_str()).increment(1);
    tracing::warn!(operation = operation.as_str(), ?error, "Todo API call failed");
}

impl TodoApi for HttpTodoApi {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let operation = Operation::FetchTodos;
        let response = self
            .execute(operation, self.client.get(self.collection_url()))
            .await?;
        let todos: Vec<TodoItem> = Self::decode(operation, response).await?;
        tracing::debug!(count = todos.len(), "Fetched todos");
        Ok(todos)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: TodoId) -> Result<TodoItem, ApiError> {
        let operation = Operation::FetchTodo;
        let response = self
            .execute(operation, self.client.get(self.item_url(id)))
            .await?;
        Self::decode(operation, response).await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn create(&self, draft: TodoDraft) -> Result<TodoItem, ApiError> {
        let operation = Operation::CreateTodo;
        let response = self
            .execute(
                operation,
                self.client.post(self.collection_url()).json(&draft),
            )
            .await?;
        let todo: TodoItem = Self::decode(operation, response).await?;
        tracing::debug!(todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    #[tracing::instrument(skip(self, todo), fields(todo_id = %todo.id))]
    async fn update(&self, todo: TodoItem) -> Result<(), ApiError> {
        self.execute(
            Operation::SaveTodo,
            self.client.put(self.item_url(todo.id)).json(&todo),
        )
        .await
        .map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        self.execute(Operation::DeleteTodo, self.client.delete(self.item_url(id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_the_base() {
        let api = HttpTodoApi::new("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.collection_url(), "http://localhost:8080/api/TodoItems");
        assert_eq!(
            api.item_url(TodoId::new(7)),
            "http://localhost:8080/api/TodoItems/7"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_failure() {
        let api = HttpTodoApi::new("http://127.0.0.1:9");

        let error = api.list().await.unwrap_err();

        assert!(matches!(
            error,
            ApiError::Transport {
                operation: Operation::FetchTodos,
                ..
            }
        ));
        assert_eq!(error.to_string(), "Failed to fetch todos");
    }
}
