//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The body is wrapped in `async move` and must evaluate to `Option<Action>`.
///
/// # Example
///
/// ```rust,ignore
/// use todo_core::async_effect;
///
/// async_effect! {
///     match api.list().await {
///         Ok(todos) => Some(TodosAction::TodosLoaded { todos }),
///         Err(error) => Some(TodosAction::TodosLoadFailed { error }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
