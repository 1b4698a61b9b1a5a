//! # Todo Testing
//!
//! Testing utilities for the todo workspace.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given/When/Then harness for reducers
//! - [`InMemoryTodoRepository`], a storage backend for exercising the HTTP service
//! - [`InMemoryTodoApi`], a remote API double with failure and latency injection
//! - [`fixtures`] with ready-made todo items
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{fixtures, InMemoryTodoApi};
//!
//! #[tokio::test]
//! async fn test_load() {
//!     let api = InMemoryTodoApi::with_todos(fixtures::sample_todos());
//!     let service = TodosService::new(api.clone(), ClientConfig::default());
//!     service.load().await?;
//!     assert_eq!(service.todos().await.len(), 3);
//! }
//! ```

pub mod mocks;

pub use mocks::{InMemoryTodoApi, InMemoryTodoRepository};
pub use reducer_test::{ReducerTest, assertions};

/// Ready-made todo items
pub mod fixtures {
    use todo_core::{TodoId, TodoItem};

    /// Build an item
    #[must_use]
    pub fn todo(id: i64, name: &str, is_complete: bool) -> TodoItem {
        TodoItem::new(TodoId::new(id), name, is_complete)
    }

    /// One completed and two active items, ids 1 to 3
    #[must_use]
    pub fn sample_todos() -> Vec<TodoItem> {
        vec![
            todo(1, "Walk the dog", true),
            todo(2, "Buy milk", false),
            todo(3, "Call mum", false),
        ]
    }
}
