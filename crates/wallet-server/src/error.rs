//! Conversion of failures into `{"message": ...}` JSON responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use wallet_core::CoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Carries the message shown to clients; details go to the log.
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Maps a core failure, replacing anything that is not the caller's fault
    /// with `context`.
    pub fn from_core(err: CoreError, context: &str) -> Self {
        match err {
            CoreError::InvalidInput(message) => ApiError::BadRequest(message),
            CoreError::NotFound(what) => ApiError::NotFound(not_found_message(&what)),
            other => {
                error!(error = %other, "{context}");
                ApiError::Internal(context.to_string())
            }
        }
    }

    /// Body that failed to deserialize or was missing altogether.
    pub fn invalid_payload(rejection: JsonRejection, message: &str) -> Self {
        warn!(reason = %rejection.body_text(), "{message}");
        ApiError::BadRequest(message.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) | ApiError::Internal(message) => {
                message
            }
        }
    }
}

/// `budget 7` becomes `Budget not found`.
fn not_found_message(what: &str) -> String {
    let noun = what.split_whitespace().next().unwrap_or_default();
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "Not found".to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
