//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use restful_todo_domain::{InMemoryTodoRepository, TodoRepository};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Todo store (type-erased)
    pub todos: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Create a new application state backed by an empty in-memory store
    pub fn new(config: ApiConfig) -> Self {
        Self::with_repository(config, InMemoryTodoRepository::new())
    }

    /// Create application state with a custom store implementation
    pub fn with_repository<R>(config: ApiConfig, todos: R) -> Self
    where
        R: TodoRepository + 'static,
    {
        Self {
            config: Arc::new(config),
            todos: Arc::new(todos),
        }
    }
}
