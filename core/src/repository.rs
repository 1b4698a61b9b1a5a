//! Storage boundary for todo items.
//!
//! The HTTP service only talks to storage through [`TodoRepository`].
//! `todo-postgres` provides the production implementation and `todo-testing`
//! an in-memory one.

use crate::model::{TodoDraft, TodoId, TodoItem};
use std::future::Future;
use thiserror::Error;

/// Errors reported by a repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No item with this id exists.
    #[error("Todo item {0} not found")]
    NotFound(TodoId),

    /// The backing store failed.
    #[error("Database error: {0}")]
    Database(String),
}

/// Persistence of todo items.
///
/// Implementations assign ids on [`create`](TodoRepository::create); ids are
/// positive and never reused for a different item.
pub trait TodoRepository: Send + Sync {
    /// All items, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the store cannot be read.
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, RepositoryError>> + Send;

    /// A single item, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the store cannot be read.
    fn get(
        &self,
        id: TodoId,
    ) -> impl Future<Output = Result<Option<TodoItem>, RepositoryError>> + Send;

    /// Persist a draft and return it with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the insert fails.
    fn create(
        &self,
        draft: TodoDraft,
    ) -> impl Future<Output = Result<TodoItem, RepositoryError>> + Send;

    /// Replace the name and completion flag of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no item has `item.id`.
    fn update(
        &self,
        item: TodoItem,
    ) -> impl Future<Output = Result<TodoItem, RepositoryError>> + Send;

    /// Remove an item.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no item has `id`.
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if it is not.
    fn ping(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
