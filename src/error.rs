//! Error types and HTTP error response handling.
//!
//! Every failure in the application flows through [`AppError`] and is turned
//! into the uniform error body by the outermost normalizer layer (see
//! `middleware::errors`). Handlers never build error responses themselves.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Value, json};

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and a client-facing
/// message. Expected failures (401/404/400) carry their message verbatim;
/// anything else is a 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed. Returns HTTP 500.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Missing, invalid, inactive or under-privileged API key.
    ///
    /// Returns HTTP 401 Unauthorized. The message distinguishes a missing
    /// header from an invalid key, but a lookup miss and an inactive key
    /// share one message so key values cannot be probed.
    #[error("{0}")]
    Unauthorized(String),

    /// Requested resource does not exist. Returns HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Request body failed field validation. Returns HTTP 400.
    ///
    /// Carries one message per failing field; they are joined with `", "`
    /// when the response body is built.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Request is malformed in some other way. Returns HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure with no better classification. Returns HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message (validation messages joined into one string).
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Structured error details attached to a response so the normalizer layer
/// can build the final body with the request path and timestamp.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
}

/// Build the uniform error body:
/// `{success, error, statusCode, timestamp, path}`.
pub fn error_body(status: StatusCode, message: &str, path: &str) -> Value {
    json!({
        "success": false,
        "error": message,
        "statusCode": status.as_u16(),
        "timestamp": Utc::now().to_rfc3339(),
        "path": path,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        // Minimal body as a fallback; the normalizer layer replaces it with
        // the full shape including timestamp and request path.
        let mut response = (
            status,
            Json(json!({
                "success": false,
                "error": message.clone(),
                "statusCode": status.as_u16(),
            })),
        )
            .into_response();
        response
            .extensions_mut()
            .insert(ErrorDetails { message });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_joined_with_comma_space() {
        let err = AppError::Validation(vec![
            "name must be a string".to_string(),
            "price must be a positive number".to_string(),
        ]);
        assert_eq!(
            err.message(),
            "name must be a string, price must be a positive number"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::Unauthorized("API key is required".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("Product with ID 7 not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_shape() {
        let body = error_body(StatusCode::NOT_FOUND, "Product with ID 7 not found", "/api/products/7");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Product with ID 7 not found"));
        assert_eq!(body["statusCode"], json!(404));
        assert_eq!(body["path"], json!("/api/products/7"));

        // Timestamp must be parseable ISO-8601
        let ts = body["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(ts).unwrap();
    }
}
