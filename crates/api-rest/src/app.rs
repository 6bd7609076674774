//! Application builder and configuration.
//!
//! This module provides the main application builder that assembles
//! all routes, middleware, and state into an Axum router.

use crate::{
    config::ApiConfig,
    error::ApiError,
    middleware::{logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Uri},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
pub async fn create_app(config: ApiConfig) -> anyhow::Result<Router> {
    // Initialize tracing
    init_tracing(&config)?;

    // Create application state
    let state = AppState::new(config);

    Ok(build_router(state))
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = build_cors_layer(&config);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::todos::routes())
        .merge(routes::docs::routes(config.enable_docs))
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(
            ServiceBuilder::new()
                // Tracing
                .layer(TraceLayer::new_for_http())
                // Compression
                .layer(CompressionLayer::new())
                // CORS
                .layer(cors)
                // Timeout
                .layer(TimeoutLayer::new(config.request_timeout()))
                // Custom middleware
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Initialize tracing/logging
pub fn init_tracing(config: &ApiConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    Ok(())
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
