//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pagecast_core::PagecastError;
use pagecast_logging::{EventLogger, ServiceEvent, redact_sensitive_data};
use serde_json::json;

/// An error rendered as `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
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

    /// Convert a service failure on `route`, recording it as a service event.
    pub fn from_service(route: &str, err: PagecastError) -> Self {
        let api = Self::from(err);
        if api.status.is_server_error() {
            EventLogger::log_event(ServiceEvent::Failed {
                route: route.to_string(),
                error_msg: api.message.clone(),
            });
        }
        api
    }
}

impl From<PagecastError> for ApiError {
    fn from(err: PagecastError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                redact_sensitive_data(&err.to_string()),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
