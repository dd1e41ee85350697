//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the `X-API-Key` header
//! 2. Look it up in the key store and verify it is active
//! 3. Enforce the admin flag on routes listed in the admin table
//! 4. Inject the resolved key record into the request context
//!
//! The gate never mutates the key record and performs a fresh lookup on
//! every request.

use std::collections::HashSet;

use async_trait::async_trait;
use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::api_key::ApiKey;
use crate::state::AppState;

/// Header carrying the API key. Header-name matching is case-insensitive.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; route handlers extract it with
/// `Extension<AuthContext>` to know which key made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The resolved API key record, valid for the duration of the request
    pub api_key: ApiKey,
}

/// Lookup backend for API keys.
///
/// Production uses [`PgApiKeyStore`]; tests swap in an in-memory map so the
/// gate can be exercised without a database.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Find a key record by its raw key value.
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError>;
}

/// Key store backed by the `api_keys` table.
pub struct PgApiKeyStore {
    pool: DbPool,
}

impl PgApiKeyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyStore for PgApiKeyStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        let record = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, is_active, is_admin, created_at
             FROM api_keys
             WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

/// Static table of routes that additionally require `is_admin = true`.
///
/// Keys are `(method, route pattern)` pairs as registered with the router;
/// the gate matches them against [`MatchedPath`] at dispatch time. Built
/// once at startup, never consulted reflectively.
#[derive(Debug)]
pub struct AdminRoutes(HashSet<(&'static str, &'static str)>);

impl AdminRoutes {
    /// The admin-only routes of this service.
    pub fn table() -> Self {
        let mut routes = HashSet::new();
        routes.insert(("POST", "/api/admin/products"));
        routes.insert(("POST", "/api/admin/products/bulk"));
        routes.insert(("PATCH", "/api/admin/products/{id}"));
        routes.insert(("DELETE", "/api/admin/products/{id}"));
        routes.insert(("GET", "/api/admin/products/stats"));
        routes.insert(("GET", "/api/admin/stats"));
        routes.insert(("POST", "/api/admin/clear-database"));
        routes.insert(("DELETE", "/api/categories/{id}"));
        Self(routes)
    }

    /// Whether the given operation requires an admin key.
    pub fn requires_admin(&self, method: &Method, route: &str) -> bool {
        self.0.contains(&(method.as_str(), route))
    }
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract the `X-API-Key` header; missing header is rejected with
///    "API key is required"
/// 2. Look the key up in the store. A miss and an inactive key share the
///    message "Invalid or inactive API key" so responses cannot be used to
///    probe which key values exist
/// 3. If the matched route is in the admin table and the key is not an
///    admin key, reject with "Admin access required"
/// 4. Insert [`AuthContext`] into the request and call the next handler
///
/// All three rejections are HTTP 401 and are shaped by the error
/// normalizer like every other failure.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("API key is required".to_string()))?;

    let record = match state.keys.find_by_key(&api_key).await? {
        Some(record) if record.is_active => record,
        // Unknown and inactive keys are deliberately indistinguishable
        _ => {
            return Err(AppError::Unauthorized(
                "Invalid or inactive API key".to_string(),
            ));
        }
    };

    if let Some(matched) = request.extensions().get::<MatchedPath>() {
        if state
            .admin_routes
            .requires_admin(request.method(), matched.as_str())
            && !record.is_admin
        {
            return Err(AppError::Unauthorized("Admin access required".to_string()));
        }
    }

    request.extensions_mut().insert(AuthContext { api_key: record });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_table_flags_admin_routes() {
        let table = AdminRoutes::table();
        assert!(table.requires_admin(&Method::POST, "/api/admin/products"));
        assert!(table.requires_admin(&Method::DELETE, "/api/admin/products/{id}"));
        assert!(table.requires_admin(&Method::DELETE, "/api/categories/{id}"));
    }

    #[test]
    fn admin_table_leaves_read_routes_open() {
        let table = AdminRoutes::table();
        assert!(!table.requires_admin(&Method::GET, "/api/products"));
        assert!(!table.requires_admin(&Method::GET, "/api/products/{id}"));
        assert!(!table.requires_admin(&Method::GET, "/api/categories"));
        // Same path, different method
        assert!(!table.requires_admin(&Method::GET, "/api/admin/products/{id}"));
    }
}
