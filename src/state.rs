//! Shared application state threaded through the router.

use std::sync::Arc;

use crate::db::DbPool;
use crate::middleware::auth::{AdminRoutes, ApiKeyStore, PgApiKeyStore};

/// State available to every handler and to the auth middleware.
///
/// The key store is held as an explicitly-owned handle rather than reached
/// through a global: it is created at startup, shared via `Arc`, and dropped
/// on shutdown together with the pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool used by handlers and services
    pub pool: DbPool,

    /// API key lookup backend consulted by the auth gate on every request
    pub keys: Arc<dyn ApiKeyStore>,

    /// Static table of admin-only routes, built once at startup
    pub admin_routes: Arc<AdminRoutes>,
}

impl AppState {
    /// Production state: key lookups go to the `api_keys` table.
    pub fn new(pool: DbPool) -> Self {
        let keys = Arc::new(PgApiKeyStore::new(pool.clone()));
        Self::with_key_store(pool, keys)
    }

    /// State with an injected key store (tests swap in an in-memory one).
    pub fn with_key_store(pool: DbPool, keys: Arc<dyn ApiKeyStore>) -> Self {
        Self {
            pool,
            keys,
            admin_routes: Arc::new(AdminRoutes::table()),
        }
    }
}
