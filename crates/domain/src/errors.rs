//! Error types for the todo domain.
//!
//! Errors carry an error code and an HTTP status so the REST layer can map
//! them without inspecting messages.

use crate::identifiers::TodoId;

/// Errors raised by todo operations
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// No todo is stored under the identifier
    #[error("Todo {0} doesn't exist")]
    NotFound(TodoId),

    /// Input failed validation
    #[error("Invalid todo: {0}")]
    Validation(String),
}

impl TodoError {
    /// Get the error code for this error
    ///
    /// Error codes are used in API responses for programmatic error handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
        }
    }
}

impl From<validator::ValidationErrors> for TodoError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Result type for todo operations
pub type TodoResult<T> = Result<T, TodoError>;
