//! The todo entity and its inputs.

use crate::identifiers::TodoId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier assigned at creation
    pub id: TodoId,

    /// Task text
    pub task: String,

    /// Optional free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Todo {
    /// Apply a patch in place. Returns `true` if any field changed.
    pub fn apply(&mut self, patch: TodoPatch) -> bool {
        let mut changed = false;

        if let Some(task) = patch.task.filter(|t| !t.is_empty()) {
            changed |= self.task != task;
            self.task = task;
        }
        if let Some(comment) = patch.comment.filter(|c| !c.is_empty()) {
            changed |= self.comment.as_deref() != Some(comment.as_str());
            self.comment = Some(comment);
        }

        changed
    }
}

/// Data required to create a todo
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewTodo {
    /// Task text, must not be empty
    #[validate(length(min = 1))]
    pub task: String,

    /// Optional comment
    pub comment: Option<String>,
}

impl NewTodo {
    /// Create input with a task and no comment
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            comment: None,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Partial update of a todo.
///
/// Absent and empty values leave the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// Replacement task text
    pub task: Option<String>,

    /// Replacement comment
    pub comment: Option<String>,
}

impl TodoPatch {
    /// Patch that only replaces the task
    pub fn task(task: impl Into<String>) -> Self {
        Self {
            task: Some(task.into()),
            comment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: TodoId::from_sequence(1),
            task: "abc".into(),
            comment: None,
        }
    }

    #[test]
    fn test_apply_overwrites_present_fields() {
        let mut todo = sample();
        let changed = todo.apply(TodoPatch {
            task: Some("yyy".into()),
            comment: Some("note".into()),
        });
        assert!(changed);
        assert_eq!(todo.task, "yyy");
        assert_eq!(todo.comment.as_deref(), Some("note"));
    }

    #[test]
    fn test_apply_skips_empty_values() {
        let mut todo = sample();
        let patch = TodoPatch {
            task: Some(String::new()),
            comment: None,
        };
        assert!(!todo.apply(patch));
        assert_eq!(todo.task, "abc");
    }

    #[test]
    fn test_new_todo_requires_task() {
        assert!(NewTodo::new("").validate().is_err());
        assert!(NewTodo::new("abc").with_comment("c").validate().is_ok());
    }

    #[test]
    fn test_comment_omitted_when_absent() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json, serde_json::json!({"id": "todo1", "task": "abc"}));
    }
}
