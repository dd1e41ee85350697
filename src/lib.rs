//! Product catalog REST API.
//!
//! A CRUD backend for products, categories and images, guarded by API keys:
//!
//! - **Auth gate**: every `/api` route except seeding requires an
//!   `X-API-Key` header matching an active key; routes in the admin table
//!   additionally require the key's admin flag
//! - **Response envelope**: successes are `{"success": true, "data", "meta"?}`
//! - **Error normalizer**: failures are
//!   `{"success": false, "error", "statusCode", "timestamp", "path"}`
//!
//! The router is exposed as [`app`] so integration tests can drive it
//! without binding a socket.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;
pub mod state;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
///
/// Protected routes sit behind the API key gate; the error normalizer wraps
/// everything, including the router's own 404/405 fallbacks, so every
/// failure leaves in the uniform shape.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        // Product reads (any valid key)
        .route("/api/products", get(handlers::products::list_products))
        .route(
            "/api/products/search",
            get(handlers::products::search_products),
        )
        .route("/api/products/{id}", get(handlers::products::get_product))
        // Categories
        .route("/api/categories", get(handlers::categories::list_categories))
        .route(
            "/api/categories/{id}",
            delete(handlers::categories::delete_category),
        )
        // Product administration
        .route(
            "/api/admin/products",
            post(handlers::admin_products::create_product),
        )
        .route(
            "/api/admin/products/bulk",
            post(handlers::admin_products::bulk_create_products),
        )
        .route(
            "/api/admin/products/stats",
            get(handlers::admin_products::product_stats),
        )
        .route(
            "/api/admin/products/{id}",
            patch(handlers::admin_products::update_product)
                .delete(handlers::admin_products::delete_product),
        )
        // Dashboard and maintenance
        .route("/api/admin/stats", get(handlers::admin::admin_stats))
        .route(
            "/api/admin/clear-database",
            post(handlers::admin::clear_database),
        )
        // Every route in this group goes through the key gate
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        // Public routes
        .route("/health", get(handlers::health::health_check))
        .route("/api/seed", post(handlers::seed::seed_database))
        .merge(protected)
        // Outermost failure boundary, then observability
        .layer(axum_middleware::from_fn(middleware::errors::normalize_errors))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
