//! Health check endpoint.

use crate::{error::ApiResult, state::AppState};
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Number of stored todos
    pub todos: usize,
}

/// Health check routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Basic health check
///
/// Returns service status, version and store size.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let todos = state.todos.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        todos,
    }))
}
