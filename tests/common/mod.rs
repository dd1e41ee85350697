//! Shared test support: an in-memory key store with known fixtures and
//! helpers for driving the router with `tower::ServiceExt::oneshot`.
//!
//! The state built here uses a lazy pool that never connects, so every test
//! path that stays out of the database (the auth gate, the envelope, the
//! error normalizer) runs without any infrastructure.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use product_catalog_api::error::AppError;
use product_catalog_api::middleware::auth::ApiKeyStore;
use product_catalog_api::models::api_key::ApiKey;
use product_catalog_api::state::AppState;

/// Active non-admin key fixture.
pub const READONLY_KEY: &str = "pk_readonly_demo123";
/// Active admin key fixture.
pub const ADMIN_KEY: &str = "pk_admin_demo456";
/// Inactive key fixture (valid value, revoked).
pub const INACTIVE_KEY: &str = "pk_inactive_demo789";

/// Key store backed by a plain map, mirroring the `api_keys` table.
pub struct MemoryApiKeyStore {
    keys: HashMap<String, ApiKey>,
}

impl MemoryApiKeyStore {
    pub fn with_fixtures() -> Self {
        let mut keys = HashMap::new();
        for (id, key, name, is_active, is_admin) in [
            (1, READONLY_KEY, "Read-Only Key", true, false),
            (2, ADMIN_KEY, "Admin Key", true, true),
            (3, INACTIVE_KEY, "Revoked Key", false, false),
        ] {
            keys.insert(
                key.to_string(),
                ApiKey {
                    id,
                    key: key.to_string(),
                    name: name.to_string(),
                    is_active,
                    is_admin,
                    created_at: Utc::now(),
                },
            );
        }
        Self { keys }
    }
}

#[async_trait]
impl ApiKeyStore for MemoryApiKeyStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        Ok(self.keys.get(key).cloned())
    }
}

/// App state with the fixture key store and a pool that is never connected.
pub fn test_state() -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost/catalog_test")
        .expect("lazy pool construction cannot fail on a valid URL");
    AppState::with_key_store(pool, Arc::new(MemoryApiKeyStore::with_fixtures()))
}

/// Build a request, optionally with an `X-API-Key` header.
pub fn request(method: &str, uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::empty()).expect("request construction")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Assert the uniform error shape and return the `error` message.
pub fn assert_error_shape(body: &Value, status: u16, path: &str) -> String {
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["statusCode"], Value::from(status));
    assert_eq!(body["path"], Value::from(path));
    let timestamp = body["timestamp"].as_str().expect("timestamp present");
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp is ISO-8601");
    body["error"].as_str().expect("error message present").to_string()
}
