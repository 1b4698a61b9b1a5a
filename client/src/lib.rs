//! # Todo Client
//!
//! Client side of the todo service: an HTTP [`TodoApi`](todo_core::TodoApi)
//! implementation, the client store that keeps the item list and the
//! selected item, and the render models for a terminal.
//!
//! ## Mutation and reload
//!
//! Every successful create, update or delete
//!
//! 1. moves the selection to the affected item (cleared by delete), then
//! 2. reloads both the whole collection and the selected item.
//!
//! Nothing is patched locally. A failed mutation surfaces a generic message
//! ("Failed to save todo", ...) and changes nothing else.
//!
//! ## Example
//!
//! ```ignore
//! use todo_client::{ClientConfig, HttpTodoApi, TodosService};
//! use todo_core::TodoDraft;
//!
//! let config = ClientConfig::from_env();
//! let service = TodosService::new(HttpTodoApi::from_config(&config))
//!     .with_response_wait(config.response_wait);
//!
//! service.load().await?;
//! service.create_todo(TodoDraft::new("Buy milk")).await?;
//! service.settle().await?;
//! println!("{}", service.page().await);
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod reducer;
pub mod service;
pub mod state;
pub mod view;

pub use config::ClientConfig;
pub use http::HttpTodoApi;
pub use reducer::{TodosEnvironment, TodosReducer};
pub use service::{ClientError, TodosService};
pub use state::{LoadStatus, RequestId, Resource, TodosAction, TodosState};
pub use view::{TodoListView, TodoRow, TodosPage};
