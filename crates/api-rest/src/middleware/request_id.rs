//! Request ID middleware.

use crate::error::ErrorResponse;
use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Response},
    middleware::Next,
};
use tracing::warn;
use uuid::Uuid;

/// Header carrying the request ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Borrow the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware function to add request ID
///
/// Reuses an incoming `x-request-id` header or generates a UUID v4, stores
/// it in the request extensions and echoes it on the response. Error bodies
/// are re-rendered with the ID in their `request_id` field.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response<Body> {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(req).await;

    if let Some(body) = response.extensions_mut().remove::<ErrorResponse>() {
        stamp_error_body(&mut response, body.with_request_id(request_id.as_str()));
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn stamp_error_body(response: &mut Response<Body>, body: ErrorResponse) {
    match serde_json::to_vec(&body) {
        Ok(bytes) => {
            response.headers_mut().remove(header::CONTENT_LENGTH);
            *response.body_mut() = Body::from(bytes);
        }
        Err(e) => warn!(error = %e, "Failed to attach request ID to error body"),
    }
}
