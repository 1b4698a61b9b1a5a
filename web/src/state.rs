//! Application state for Axum handlers.

use std::sync::Arc;
use todo_core::TodoRepository;

/// State shared by every handler: the todo repository.
pub struct AppState<R> {
    /// Storage for todo items.
    pub repository: Arc<R>,
}

impl<R: TodoRepository> AppState<R> {
    /// Create state around a repository.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self::from_arc(Arc::new(repository))
    }

    /// Create state around an already shared repository.
    #[must_use]
    pub const fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_testing::InMemoryTodoRepository;

    #[test]
    fn test_clones_share_repository() {
        let state = AppState::new(InMemoryTodoRepository::new());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.repository, &clone.repository));
    }
}
