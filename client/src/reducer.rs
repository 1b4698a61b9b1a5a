//! The reducer behind the client store.
//!
//! Every successful mutation moves the selection and reloads both the
//! collection and the selected item. Nothing is patched locally. A failed
//! mutation only records the error.

use crate::state::{RequestId, TodosAction, TodosState};
use std::marker::PhantomData;
use std::sync::Arc;
use todo_core::effect::Effect;
use todo_core::reducer::Reducer;
use todo_core::{ApiError, SmallVec, TodoApi, async_effect, smallvec};

/// Dependencies of [`TodosReducer`].
pub struct TodosEnvironment<A> {
    /// The remote service.
    pub api: Arc<A>,
}

impl<A> TodosEnvironment<A> {
    /// Wrap an API client.
    pub fn new(api: A) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Share an existing API client.
    pub const fn from_arc(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> Clone for TodosEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

/// Reducer for [`TodosState`].
pub struct TodosReducer<A> {
    _api: PhantomData<fn() -> A>,
}

impl<A> TodosReducer<A> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }
}

impl<A> Default for TodosReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for TodosReducer<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

type Effects = SmallVec<[Effect<TodosAction>; 4]>;

impl<A: TodoApi + 'static> TodosReducer<A> {
    fn reload_todos(state: &mut TodosState, env: &TodosEnvironment<A>) -> Effect<TodosAction> {
        state.todos.loading();
        let api = Arc::clone(&env.api);
        async_effect! {
            match api.list().await {
                Ok(todos) => Some(TodosAction::TodosLoaded { todos }),
                Err(error) => Some(TodosAction::TodosLoadFailed { error }),
            }
        }
    }

    fn reload_selected(state: &mut TodosState, env: &TodosEnvironment<A>) -> Effect<TodosAction> {
        let Some(id) = state.selected_id else {
            state.selected.resolve(None);
            return Effect::None;
        };

        state.selected.loading();
        let api = Arc::clone(&env.api);
        async_effect! {
            match api.get(id).await {
                Ok(todo) => Some(TodosAction::SelectedLoaded { todo: Some(todo) }),
                Err(error) => Some(TodosAction::SelectedLoadFailed { error }),
            }
        }
    }

    fn reload_all(state: &mut TodosState, env: &TodosEnvironment<A>) -> Effects {
        smallvec![Effect::merge(vec![
            Self::reload_todos(state, env),
            Self::reload_selected(state, env),
        ])]
    }

    fn reject(request_id: RequestId, error: ApiError) -> Effects {
        smallvec![async_effect! {
            Some(TodosAction::MutationFailed { request_id, error })
        }]
    }
}

impl<A: TodoApi + 'static> Reducer for TodosReducer<A> {
    type State = TodosState;
    type Action = TodosAction;
    type Environment = TodosEnvironment<A>;

    #[allow(clippy::too_many_lines)] // one arm per action
    fn reduce(
        &self,
        state: &mut TodosState,
        action: TodosAction,
        env: &TodosEnvironment<A>,
    ) -> Effects {
        match action {
            TodosAction::Reload => smallvec![Self::reload_todos(state, env)],

            TodosAction::ReloadSelected => smallvec![Self::reload_selected(state, env)],

            TodosAction::Select { id } => {
                state.selected_id = id;
                smallvec![Self::reload_selected(state, env)]
            },

            TodosAction::Create { request_id, draft } => {
                if let Err(error) = draft.validate() {
                    return Self::reject(request_id, error.into());
                }
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    match api.create(draft).await {
                        Ok(todo) => Some(TodosAction::Created { request_id, todo }),
                        Err(error) => Some(TodosAction::MutationFailed { request_id, error }),
                    }
                }]
            },

            TodosAction::Update { request_id, todo } => {
                if let Err(error) = todo.validate() {
                    return Self::reject(request_id, error.into());
                }
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    match api.update(todo.clone()).await {
                        Ok(()) => Some(TodosAction::Updated { request_id, todo }),
                        Err(error) => Some(TodosAction::MutationFailed { request_id, error }),
                    }
                }]
            },

            TodosAction::Delete { request_id, id } => {
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    match api.delete(id).await {
                        Ok(()) => Some(TodosAction::Deleted { request_id, id }),
                        Err(error) => Some(TodosAction::MutationFailed { request_id, error }),
                    }
                }]
            },

            TodosAction::TodosLoaded { todos } => {
                tracing::debug!(count = todos.len(), "Todos loaded");
                state.todos.resolve(todos);
                smallvec![Effect::None]
            },

            TodosAction::TodosLoadFailed { error } => {
                tracing::warn!(?error, "Loading todos failed");
                state.last_error = Some(error.to_string());
                state.todos.fail(error);
                smallvec![Effect::None]
            },

            TodosAction::SelectedLoaded { todo } => {
                state.selected.resolve(todo);
                smallvec![Effect::None]
            },

            TodosAction::SelectedLoadFailed { error } => {
                tracing::warn!(?error, "Loading selected todo failed");
                state.last_error = Some(error.to_string());
                state.selected.fail(error);
                smallvec![Effect::None]
            },

            TodosAction::Created { request_id, todo } => {
                tracing::info!(%request_id, todo_id = %todo.id, "Todo created");
                state.selected_id = Some(todo.id);
                state.last_error = None;
                Self::reload_all(state, env)
            },

            TodosAction::Updated { request_id, todo } => {
                tracing::info!(%request_id, todo_id = %todo.id, "Todo saved");
                state.selected_id = Some(todo.id);
                state.last_error = None;
                Self::reload_all(state, env)
            },

            TodosAction::Deleted { request_id, id } => {
                tracing::info!(%request_id, todo_id = %id, "Todo deleted");
                state.selected_id = None;
                state.last_error = None;
                Self::reload_all(state, env)
            },

            TodosAction::MutationFailed { request_id, error } => {
                tracing::warn!(%request_id, ?error, "Todo mutation failed");
                state.last_error = Some(error.to_string());
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::state::LoadStatus;
    use todo_core::{Operation, TodoDraft, TodoId, TodoItem, ValidationError};
    use todo_testing::{InMemoryTodoApi, ReducerTest, assertions, fixtures};

    fn env() -> TodosEnvironment<InMemoryTodoApi> {
        TodosEnvironment::new(InMemoryTodoApi::with_todos(fixtures::sample_todos()))
    }

    fn loaded_state() -> TodosState {
        let mut state = TodosState::default();
        state.todos.resolve(fixtures::sample_todos());
        state
    }

    fn assert_parallel_reloads(effects: &[Effect<TodosAction>], requests: usize) {
        assert!(
            matches!(effects, [Effect::Parallel(_)]),
            "Expected one parallel effect, got {effects:?}"
        );
        assertions::assert_future_count(effects, requests);
    }

    #[test]
    fn reload_marks_collection_loading() {
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Reload)
            .then_state(|state| {
                assert!(state.todos.is_loading());
                assert_eq!(state.todos.value, fixtures::sample_todos());
            })
            .then_effects(|effects| assertions::assert_future_count(effects, 1))
            .run();
    }

    #[test]
    fn reload_selected_without_selection_needs_no_request() {
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(TodosState::default())
            .when_action(TodosAction::ReloadSelected)
            .then_state(|state| {
                assert_eq!(state.selected.status, LoadStatus::Ready);
                assert_eq!(state.selected.value, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn select_changes_selection_and_fetches_it() {
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Select {
                id: Some(TodoId::new(2)),
            })
            .then_state(|state| {
                assert_eq!(state.selected_id, Some(TodoId::new(2)));
                assert!(state.selected.is_loading());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn create_issues_request_without_touching_state() {
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Create {
                request_id: RequestId::new(),
                draft: TodoDraft::new("Buy milk"),
            })
            .then_state(|state| assert_eq!(*state, loaded_state()))
            .then_effects(|effects| assertions::assert_future_count(effects, 1))
            .run();
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_a_request() {
        let env = env();
        let api = Arc::clone(&env.api);
        let request_id = RequestId::new();
        let mut state = loaded_state();

        let effects = TodosReducer::new().reduce(
            &mut state,
            TodosAction::Create {
                request_id,
                draft: TodoDraft::new("   "),
            },
            &env,
        );

        let Some(Effect::Future(fut)) = effects.into_iter().next() else {
            unreachable!("a rejected mutation is reported by a future");
        };
        assert_eq!(
            fut.await,
            Some(TodosAction::MutationFailed {
                request_id,
                error: ApiError::Validation(ValidationError::BlankName),
            })
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn created_selects_item_and_reloads_both_views() {
        let todo = fixtures::todo(4, "Buy milk", false);
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Created {
                request_id: RequestId::new(),
                todo,
            })
            .then_state(|state| {
                assert_eq!(state.selected_id, Some(TodoId::new(4)));
                assert!(state.todos.is_loading());
                assert!(state.selected.is_loading());
            })
            .then_effects(|effects| assert_parallel_reloads(effects, 2))
            .run();
    }

    #[test]
    fn updated_selects_item_and_reloads_both_views() {
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Updated {
                request_id: RequestId::new(),
                todo: fixtures::todo(2, "Buy milk", true),
            })
            .then_state(|state| assert_eq!(state.selected_id, Some(TodoId::new(2))))
            .then_effects(|effects| assert_parallel_reloads(effects, 2))
            .run();
    }

    #[test]
    fn deleted_clears_selection_and_reloads_collection() {
        let mut state = loaded_state();
        state.selected_id = Some(TodoId::new(3));
        state
            .selected
            .resolve(Some(fixtures::todo(3, "Call mum", false)));

        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodosAction::Deleted {
                request_id: RequestId::new(),
                id: TodoId::new(3),
            })
            .then_state(|state| {
                assert_eq!(state.selected_id, None);
                assert_eq!(state.selected.value, None);
                assert!(state.todos.is_loading());
            })
            .then_effects(|effects| assert_parallel_reloads(effects, 1))
            .run();
    }

    #[test]
    fn mutation_failure_records_error_and_does_nothing_else() {
        let mut state = loaded_state();
        state.selected_id = Some(TodoId::new(1));

        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodosAction::MutationFailed {
                request_id: RequestId::new(),
                error: ApiError::Status {
                    operation: Operation::DeleteTodo,
                    status: 500,
                },
            })
            .then_state(|state| {
                assert_eq!(state.last_error.as_deref(), Some("Failed to delete todo"));
                assert_eq!(state.selected_id, Some(TodoId::new(1)));
                assert_eq!(state.todos.status, LoadStatus::Ready);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn later_load_result_replaces_earlier_one() {
        let first = vec![fixtures::todo(1, "Old", false)];
        let second = vec![fixtures::todo(1, "New", false)];

        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(TodosState::default())
            .when_action(TodosAction::TodosLoaded { todos: first })
            .when_action(TodosAction::TodosLoaded {
                todos: second.clone(),
            })
            .then_state(move |state| assert_eq!(state.todos.value, second))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failed_load_keeps_previous_items() {
        let error = ApiError::Status {
            operation: Operation::FetchTodos,
            status: 502,
        };
        ReducerTest::new(TodosReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(TodosAction::Reload)
            .when_action(TodosAction::TodosLoadFailed {
                error: error.clone(),
            })
            .then_state(move |state| {
                assert_eq!(state.todos.status, LoadStatus::Failed);
                assert_eq!(state.todos.value, fixtures::sample_todos());
                assert_eq!(state.todos.error, Some(error));
                assert_eq!(state.last_error.as_deref(), Some("Failed to fetch todos"));
            })
            .run();
    }

    #[test]
    fn selected_item_is_pinned_in_derived_lists() {
        let mut state = loaded_state();
        state.selected_id = Some(TodoId::new(1));

        let lists = state.lists();
        let completed: Vec<i64> = lists.completed.iter().map(|t| t.id.value()).collect();
        let active: Vec<i64> = lists.active.iter().map(|t| t.id.value()).collect();

        assert_eq!(active, vec![3, 2]);
        assert_eq!(completed, vec![1]);
        assert_eq!(
            TodoItem::new(TodoId::new(1), "Walk the dog", true),
            lists.completed[0]
        );
    }
}
