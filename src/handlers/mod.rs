//! HTTP request handlers (route handlers).
//!
//! Handlers stay thin: extract request data, call a service, return the
//! result wrapped in [`crate::response::ApiResponse`]. Errors bubble up as
//! [`crate::error::AppError`] and are shaped by the normalizer layer.

/// Admin dashboard and maintenance endpoints
pub mod admin;
/// Admin product CRUD endpoints
pub mod admin_products;
/// Category endpoints
pub mod categories;
/// Liveness endpoint
pub mod health;
/// Read-side product endpoints
pub mod products;
/// First-run initialization endpoint
pub mod seed;
