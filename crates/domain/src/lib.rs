//! Restful Todo Domain Types
//!
//! This crate provides the core domain model for the todo service: the todo
//! entity, its identifiers, domain errors, and the storage port together with
//! the in-memory store the service runs on.
//!
//! ## Architecture
//!
//! - **identifiers**: `todo<n>` identifiers and their generator
//! - **todo**: The todo entity and its create/update inputs
//! - **repository**: Storage port and in-memory implementation
//! - **errors**: Error types with HTTP status codes
//!
//! ## Usage
//!
//! ```rust
//! use restful_todo_domain::{InMemoryTodoRepository, NewTodo, TodoRepository};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let repo = InMemoryTodoRepository::new();
//!     let todo = repo.create(NewTodo::new("write docs")).await.unwrap();
//!     assert_eq!(todo.id.as_str(), "todo1");
//! });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod repository;
pub mod todo;

// Re-export commonly used types
pub use errors::{TodoError, TodoResult};
pub use identifiers::{TodoId, TodoIdGenerator};
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use todo::{NewTodo, Todo, TodoPatch};
