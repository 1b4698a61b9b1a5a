//! Render models for the todo page, printable to a terminal.

use crate::state::TodosState;
use std::fmt;
use todo_core::{TodoId, TodoItem};

/// Title of the page.
pub const PAGE_TITLE: &str = "Your todos";

/// Title of the list of incomplete items.
pub const ACTIVE_TITLE: &str = "To do";

/// Title of the list of completed items.
pub const COMPLETED_TITLE: &str = "Done";

/// Shown instead of rows when a list is empty.
pub const EMPTY_PLACEHOLDER: &str = "Nothing to do right now...";

/// One item in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// Item id
    pub id: TodoId,
    /// Item name
    pub name: String,
    /// Whether the item is done
    pub is_complete: bool,
    /// The item was just created or saved and is still open
    pub highlighted: bool,
}

impl TodoRow {
    /// Build a row; `newest` is the loaded selected item.
    #[must_use]
    pub fn new(todo: &TodoItem, newest: Option<TodoId>) -> Self {
        Self {
            id: todo.id,
            name: todo.name.clone(),
            is_complete: todo.is_complete,
            highlighted: newest == Some(todo.id) && !todo.is_complete,
        }
    }
}

impl fmt::Display for TodoRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_complete { 'x' } else { ' ' };
        write!(f, "[{mark}] {:>4}  {}", self.id, self.name)?;
        if self.highlighted {
            f.write_str("  *")?;
        }
        Ok(())
    }
}

/// A titled list of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListView {
    /// List title
    pub title: String,
    /// Rows in display order
    pub rows: Vec<TodoRow>,
    /// Whether the list offers a way to add items
    pub show_create_form: bool,
}

impl TodoListView {
    /// Build a list from items already in display order.
    #[must_use]
    pub fn new(title: impl Into<String>, items: &[TodoItem], newest: Option<TodoId>) -> Self {
        Self {
            title: title.into(),
            rows: items.iter().map(|todo| TodoRow::new(todo, newest)).collect(),
            show_create_form: false,
        }
    }

    /// Offer the create form above the list
    #[must_use]
    pub const fn with_create_form(mut self) -> Self {
        self.show_create_form = true;
        self
    }

    /// Number of rows
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// `"{title} ({count})"`
    #[must_use]
    pub fn header(&self) -> String {
        format!("{} ({})", self.title, self.count())
    }
}

impl fmt::Display for TodoListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_create_form {
            writeln!(f, "New todo: todo add <name>")?;
        }
        writeln!(f, "{}", self.header())?;
        if self.rows.is_empty() {
            writeln!(f, "  {EMPTY_PLACEHOLDER}")?;
        }
        for row in &self.rows {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}

/// The whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosPage {
    /// Page title
    pub title: String,
    /// Total number of loaded items
    pub count: usize,
    /// Incomplete items, with the create form
    pub active: TodoListView,
    /// Completed items
    pub completed: TodoListView,
    /// Most recent failure, if any
    pub error: Option<String>,
}

impl TodosPage {
    /// Derive the page from client state.
    #[must_use]
    pub fn from_state(state: &TodosState) -> Self {
        let lists = state.lists();
        let newest = state.selected_item().map(|todo| todo.id);

        Self {
            title: PAGE_TITLE.to_string(),
            count: state.todos.value.len(),
            active: TodoListView::new(ACTIVE_TITLE, &lists.active, newest).with_create_form(),
            completed: TodoListView::new(COMPLETED_TITLE, &lists.completed, newest),
            error: state.last_error.clone(),
        }
    }

    /// `"You have N todo(s)."`
    #[must_use]
    pub fn summary(&self) -> String {
        format!("You have {} todo(s).", self.count)
    }
}

impl fmt::Display for TodosPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.summary())?;
        if let Some(error) = &self.error {
            writeln!(f, "! {error}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.active)?;
        writeln!(f)?;
        write!(f, "{}", self.completed)
    }
}
