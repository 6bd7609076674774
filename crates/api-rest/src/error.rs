//! HTTP error handling and conversion.
//!
//! This module provides error types for the REST API and implements
//! conversion from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use restful_todo_domain::TodoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain error
    #[error(transparent)]
    Domain(#[from] TodoError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,

    /// No route matches the request path
    #[error("The requested URL {0} was not found on the server")]
    RouteNotFound(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(err) => {
                StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(err) => err.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::RouteNotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Standardized error response
///
/// Error responses also carry a copy of this body in their extensions so the
/// request ID middleware can stamp `request_id` before the body goes out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// ID of the failed request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            request_id: None,
        }
    }

    /// Attach the request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if let Self::Internal(details) = &self {
            error!(error_code, details = %details, "Internal error");
        }

        let body = ErrorResponse::new(error_code, message);

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use restful_todo_domain::TodoId;

    #[test]
    fn test_domain_not_found_maps_to_404() {
        let err = ApiError::from(TodoError::NotFound(TodoId::from("todo9")));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Todo todo9 doesn't exist");
    }

    #[test]
    fn test_request_id_is_omitted_until_attached() {
        let body = ErrorResponse::new("NOT_FOUND", "gone");
        assert!(serde_json::to_value(&body).unwrap().get("request_id").is_none());

        let body = body.with_request_id("req-1");
        assert_eq!(serde_json::to_value(&body).unwrap()["request_id"], "req-1");
    }

    #[test]
    fn test_error_body_travels_in_extensions() {
        let response = ApiError::PayloadTooLarge.into_response();
        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.error, "PAYLOAD_TOO_LARGE");
        assert_eq!(body.request_id, None);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let err = ApiError::BadRequest("unknown field `bogus`".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
