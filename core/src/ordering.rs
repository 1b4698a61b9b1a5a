//! Display ordering and active/completed partitioning of todo items.
//!
//! All functions here are pure: they read the collection and return new
//! vectors, leaving the stored collection untouched.
//!
//! Ordering rule, in priority:
//!
//! 1. The selected item sorts first, whatever its completion state.
//! 2. Incomplete items sort before completed ones.
//! 3. Within a completion group, higher ids sort before lower ids.

use crate::model::{TodoId, TodoItem};
use std::cmp::Ordering;

/// Compare two items for display.
///
/// `Ordering::Less` means `a` is shown above `b`.
#[must_use]
pub fn compare(a: &TodoItem, b: &TodoItem, selected: Option<TodoId>) -> Ordering {
    let a_selected = selected == Some(a.id);
    let b_selected = selected == Some(b.id);

    b_selected
        .cmp(&a_selected)
        .then_with(|| a.is_complete.cmp(&b.is_complete))
        .then_with(|| b.id.cmp(&a.id))
}

/// The items in display order.
///
/// The sort is stable, so items that compare equal (only possible with
/// duplicate ids) keep their input order.
#[must_use]
pub fn display_order(items: &[TodoItem], selected: Option<TodoId>) -> Vec<TodoItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| compare(a, b, selected));
    ordered
}

/// Split items into `(active, completed)`, preserving input order.
#[must_use]
pub fn partition(items: &[TodoItem]) -> (Vec<TodoItem>, Vec<TodoItem>) {
    items.iter().cloned().partition(|todo| !todo.is_complete)
}

/// The two derived views shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoLists {
    /// Incomplete items in display order.
    pub active: Vec<TodoItem>,
    /// Completed items in display order.
    pub completed: Vec<TodoItem>,
}

impl TodoLists {
    /// Partition `items` and order each side independently.
    ///
    /// The selected item still leads whichever side contains it.
    #[must_use]
    pub fn derive(items: &[TodoItem], selected: Option<TodoId>) -> Self {
        let (active, completed) = partition(items);
        Self {
            active: display_order(&active, selected),
            completed: display_order(&completed, selected),
        }
    }

    /// Total number of items across both views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    /// Whether there is nothing to show at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}
