//! Restful Todo REST API
//!
//! This crate provides an Axum-based REST API over an in-memory todo list,
//! with API documentation generated from the handler annotations.
//!
//! ## Architecture
//!
//! The API is organized into the following modules:
//!
//! - **app**: Application builder and tracing setup
//! - **config**: Layered configuration (defaults, files, environment)
//! - **routes**: HTTP route handlers (todos, documentation, health)
//! - **middleware**: Request ID and request logging middleware
//! - **extractors**: Validated JSON extractor
//! - **responses**: `201 Created` and `204 No Content` responses
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use restful_todo_api_rest::app::create_app;
//! use restful_todo_api_rest::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ApiConfig::load().expect("Failed to load config");
//!     let address = config.server_address();
//!     let app = create_app(config).await.expect("Failed to create app");
//!
//!     let listener = tokio::net::TcpListener::bind(address)
//!         .await
//!         .expect("Failed to bind");
//!
//!     axum::serve(listener, app)
//!         .await
//!         .expect("Server error");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{build_router, create_app};
pub use config::{ApiConfig, ListFormat};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
