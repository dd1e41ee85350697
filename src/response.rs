//! Success envelope for API responses.
//!
//! Every successful handler result is wrapped into the uniform shape
//! `{"success": true, "data": ..., "meta": ...?}`. Handlers that build a
//! fully custom envelope (anything already carrying a `success` field, such
//! as the seed endpoint) pass through untouched, and paginated results that
//! already use the `{data, meta}` convention are hoisted rather than
//! double-wrapped.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Wrapper for handler results that adds the success envelope on the way out.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 OK response.
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
        }
    }

    /// A 201 Created response.
    pub fn created(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::CREATED,
        }
    }
}

/// Apply the envelope transform to a raw handler result.
///
/// - A value that is already an object with a `success` field is returned
///   unchanged (idempotent; no double wrapping).
/// - An object with a `data` field has `data` hoisted; its `meta` field, when
///   present, is carried alongside.
/// - Any other value becomes the `data` payload wholesale.
pub fn envelope(value: Value) -> Value {
    if value
        .as_object()
        .is_some_and(|obj| obj.contains_key("success"))
    {
        return value;
    }

    let (data, meta) = match value {
        Value::Object(mut obj) if obj.contains_key("data") => {
            let data = obj.remove("data").unwrap_or(Value::Null);
            let meta = obj.remove("meta");
            (data, meta)
        }
        Value::Object(obj) => {
            let meta = obj.get("meta").cloned();
            (Value::Object(obj), meta)
        }
        other => (other, None),
    };

    let mut wrapped = json!({ "success": true, "data": data });
    if let Some(meta) = meta {
        wrapped["meta"] = meta;
    }
    wrapped
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let raw = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return crate::error::AppError::Internal(
                    "Failed to serialize response data".to_string(),
                )
                .into_response();
            }
        };

        (self.status_code, Json(envelope(raw))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_is_wrapped() {
        let wrapped = envelope(json!({ "id": 1, "name": "iMac" }));
        assert_eq!(
            wrapped,
            json!({ "success": true, "data": { "id": 1, "name": "iMac" } })
        );
    }

    #[test]
    fn array_is_wrapped_wholesale() {
        let wrapped = envelope(json!([1, 2, 3]));
        assert_eq!(wrapped, json!({ "success": true, "data": [1, 2, 3] }));
    }

    #[test]
    fn paginated_result_is_hoisted_not_nested() {
        let wrapped = envelope(json!({
            "data": [{ "id": 1 }],
            "meta": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
        }));
        assert_eq!(
            wrapped,
            json!({
                "success": true,
                "data": [{ "id": 1 }],
                "meta": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
            })
        );
    }

    #[test]
    fn already_enveloped_value_passes_through_unchanged() {
        let enveloped = json!({
            "success": true,
            "data": { "id": 1 },
            "meta": { "page": 1 }
        });
        assert_eq!(envelope(enveloped.clone()), enveloped);

        // Custom envelopes (seed endpoint) also pass through
        let custom = json!({ "success": true, "adminApiKey": "abc", "readOnlyApiKey": "def" });
        assert_eq!(envelope(custom.clone()), custom);
    }

    #[test]
    fn envelope_is_idempotent() {
        let once = envelope(json!({ "data": { "id": 1 }, "meta": { "page": 1 } }));
        let twice = envelope(once.clone());
        assert_eq!(once, twice);
    }
}
