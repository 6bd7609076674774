//! Standardized API response types.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Created response (HTTP 201) pointing at the new resource.
///
/// The body is empty; clients follow the `Location` header.
pub struct Created {
    location: String,
}

impl Created {
    /// Create a response whose `Location` header is `location`
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        let location = match HeaderValue::try_from(self.location) {
            Ok(value) => value,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

        (
            StatusCode::CREATED,
            [
                (header::LOCATION, location),
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ),
            ],
        )
            .into_response()
    }
}

/// No content response (HTTP 204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
