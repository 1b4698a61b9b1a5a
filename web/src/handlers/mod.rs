//! HTTP handlers.

pub mod health;
pub mod todo_items;
