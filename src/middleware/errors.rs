//! Outermost error-normalization boundary.
//!
//! Every failure response leaving the service is rewritten into the uniform
//! shape `{success: false, error, statusCode, timestamp, path}` and logged
//! with method, path, status and message. This covers [`AppError`] values,
//! framework rejections (bad JSON bodies, unmatched routes, wrong methods)
//! and anything else a layer below might produce; no default error page can
//! reach a client.

use axum::{
    Json,
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::{ErrorDetails, error_body};

/// Largest error body we are willing to buffer when salvaging a message
/// from a framework-produced response.
const ERROR_BODY_LIMIT: usize = 64 * 1024;

/// Normalize every 4xx/5xx response and log it.
pub async fn normalize_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    // Failures raised as AppError carry their message in an extension.
    if let Some(details) = response.extensions().get::<ErrorDetails>().cloned() {
        tracing::error!(
            "{} {} - Status: {} - Error: {}",
            method,
            path,
            status.as_u16(),
            details.message
        );
        return (status, Json(error_body(status, &details.message, &path))).into_response();
    }

    // Anything else (extractor rejections, fallback 404s, ...): use the body
    // text as the message when there is one, otherwise a generic message.
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, ERROR_BODY_LIMIT)
        .await
        .unwrap_or_default();

    if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
        if value.get("success").is_some() {
            // Already normalized upstream
            return Response::from_parts(parts, Body::from(bytes));
        }
    }

    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    let message = if !text.is_empty() {
        text
    } else if status.is_server_error() {
        "Internal server error".to_string()
    } else {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    };

    tracing::error!(
        "{} {} - Status: {} - Error: {}",
        method,
        path,
        status.as_u16(),
        message
    );
    (status, Json(error_body(status, &message, &path))).into_response()
}
