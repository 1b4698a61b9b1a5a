//! # Todo Core
//!
//! Domain types and pure logic shared by the todo service and its clients.
//!
//! ## Contents
//!
//! - **Model**: [`TodoItem`], [`TodoDraft`] and the [`TodoId`] newtype
//! - **Ordering**: the derived display order and active/completed partition
//! - **Repository**: the storage boundary used by the HTTP service
//! - **Api**: the remote boundary used by clients
//! - **Reducer / Effect**: the `(State, Action, Environment) → (State, Effects)`
//!   abstraction that drives client state
//!
//! ## Example
//!
//! ```
//! use todo_core::{ordering, TodoId, TodoItem};
//!
//! let items = vec![
//!     TodoItem::new(TodoId::new(1), "Walk dog", true),
//!     TodoItem::new(TodoId::new(2), "Buy milk", false),
//!     TodoItem::new(TodoId::new(3), "Call mum", false),
//! ];
//!
//! let ids: Vec<i64> = ordering::display_order(&items, None)
//!     .iter()
//!     .map(|todo| todo.id.value())
//!     .collect();
//! assert_eq!(ids, vec![3, 2, 1]);
//! ```

pub use smallvec::{SmallVec, smallvec};

pub mod api;
pub mod model;
pub mod ordering;
pub mod repository;

mod effect_macros;

pub use api::{ApiError, Operation, TODO_ITEMS_PATH, TodoApi};
pub use model::{TodoDraft, TodoId, TodoItem, ValidationError};
pub use ordering::TodoLists;
pub use repository::{RepositoryError, TodoRepository};

/// Reducer module - the core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They never perform I/O themselves; they describe it with [`Effect`](crate::effect::Effect)
/// values that the runtime executes.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns the effects to be executed
        /// by the runtime. Most actions produce zero or one effect, hence the
        /// inline capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values. They are returned from reducers and executed by the
/// `Store`, which feeds any resulting action back into the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Number of leaf `Future` effects contained in this effect tree
        #[must_use]
        pub fn future_count(&self) -> usize {
            match self {
                Effect::None => 0,
                Effect::Future(_) => 1,
                Effect::Parallel(effects) => effects.iter().map(Effect::future_count).sum(),
            }
        }
    }
}
