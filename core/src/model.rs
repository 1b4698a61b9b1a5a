//! The todo item entity and its unsaved draft.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Server-assigned identifier of a todo item.
///
/// Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Identifier assigned by the server on creation.
    pub id: TodoId,
    /// What needs doing.
    pub name: String,
    /// Whether the item has been done.
    #[serde(default)]
    pub is_complete: bool,
}

impl TodoItem {
    /// Build an item from its parts.
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_complete,
        }
    }

    /// Check the name against the same rule drafts follow.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankName`] when the name is empty or whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// A copy of this item with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_complete: !self.is_complete,
            ..self.clone()
        }
    }

    /// A copy of this item under a new name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// A todo item that has not been persisted yet.
///
/// On the wire a draft may also carry an `id` (clients commonly send `0`);
/// it is ignored because the server assigns identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    /// What needs doing.
    pub name: String,
    /// Initial completion state.
    #[serde(default)]
    pub is_complete: bool,
}

impl TodoDraft {
    /// A new, incomplete draft.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_complete: false,
        }
    }

    /// Set the initial completion state.
    #[must_use]
    pub const fn with_complete(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }

    /// Check that the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankName`] when the name is empty or whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }

    /// Attach a server-assigned identifier.
    #[must_use]
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            name: self.name,
            is_complete: self.is_complete,
        }
    }
}

impl From<TodoItem> for TodoDraft {
    fn from(item: TodoItem) -> Self {
        Self {
            name: item.name,
            is_complete: item.is_complete,
        }
    }
}

/// Rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name has no visible characters.
    #[error("Todo name must not be blank")]
    BlankName,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let item = TodoItem::new(TodoId::new(7), "Buy milk", true);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({ "id": 7, "name": "Buy milk", "isComplete": true }));
    }

    #[test]
    fn item_defaults_completion_to_false() {
        let item: TodoItem = serde_json::from_value(json!({ "id": 3, "name": "Read" })).unwrap();
        assert!(!item.is_complete);
    }

    #[test]
    fn draft_ignores_client_supplied_id() {
        let draft: TodoDraft =
            serde_json::from_value(json!({ "id": 0, "name": "Buy milk", "isComplete": false }))
                .unwrap();
        assert_eq!(draft, TodoDraft::new("Buy milk"));
    }

    #[test]
    fn draft_requires_name() {
        let result: Result<TodoDraft, _> = serde_json::from_value(json!({ "isComplete": true }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(TodoDraft::new("").validate(), Err(ValidationError::BlankName));
        assert_eq!(TodoDraft::new("  \t").validate(), Err(ValidationError::BlankName));
        assert!(TodoDraft::new("x").validate().is_ok());
        assert!(TodoItem::new(TodoId::new(1), " ", false).validate().is_err());
    }

    #[test]
    fn toggled_and_renamed_keep_identity() {
        let item = TodoItem::new(TodoId::new(4), "Old", false);
        let toggled = item.toggled();
        assert_eq!(toggled.id, item.id);
        assert!(toggled.is_complete);

        let renamed = item.renamed("New");
        assert_eq!(renamed.id, item.id);
        assert_eq!(renamed.name, "New");
        assert!(!renamed.is_complete);
    }

    #[test]
    fn todo_id_parses_from_path_segments() {
        assert_eq!("42".parse::<TodoId>().unwrap(), TodoId::new(42));
        assert!("abc".parse::<TodoId>().is_err());
    }
}
