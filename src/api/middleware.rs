//! API state, error type and middleware
//!
//! Every error leaves the API as the same JSON envelope:
//! `{"status": 404, "message": "...", "details": "uri=/api/cms/v1/team"}`.
//! Handlers return [`ApiError`]; [`error_details`] stamps the request path
//! onto the envelope on the way out.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::{ContentService, EventService, PlatformError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub content_service: Arc<ContentService>,
    pub event_service: Arc<EventService>,
}

/// Uniform error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error returned by handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Request parameters failed validation
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_ACCEPTABLE, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn body(&self, details: Option<String>) -> ErrorResponse {
        ErrorResponse {
            status: self.status.as_u16(),
            message: self.message.clone(),
            details,
        }
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::ContentNotFound(_) => Self::not_found(err.to_string()),
            PlatformError::PlatformInternal { message, .. } => Self::internal_error(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body(None))).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Re-render error responses with the originating request path
pub async fn error_details(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    match response.extensions().get::<ApiError>() {
        Some(err) => {
            let body = err.body(Some(format!("uri={}", path)));
            (err.status, Json(body)).into_response()
        }
        None => response,
    }
}

/// Fallback for unmatched routes
pub async fn not_found_fallback() -> ApiError {
    ApiError::not_found("Resource not found")
}

/// Fallback for known routes called with an unsupported method
pub async fn method_not_allowed_fallback() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
