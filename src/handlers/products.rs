//! Read-side product endpoints.
//!
//! - `GET /api/products` - list with filters and pagination
//! - `GET /api/products/search` - substring search
//! - `GET /api/products/{id}` - single product with images and category
//!
//! All three require a valid API key but not an admin key.

use axum::extract::{Path, Query, State};

use crate::error::AppError;
use crate::models::product::{
    FilterProductsQuery, PaginatedProducts, ProductResponse, SearchProductsQuery,
};
use crate::response::ApiResponse;
use crate::services::product_service;
use crate::state::AppState;

/// `GET /api/products` - list products.
///
/// # Query Parameters
///
/// - `page` (default 1), `limit` (default 10, max 100)
/// - `category`, `brand`, `condition`: case-insensitive substring filters
/// - `minPrice`, `maxPrice`: inclusive price bounds
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "success": true,
///   "data": [ ... ],
///   "meta": { "page": 1, "limit": 10, "total": 42, "totalPages": 5 }
/// }
/// ```
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<FilterProductsQuery>,
) -> Result<ApiResponse<PaginatedProducts>, AppError> {
    Ok(ApiResponse::success(
        product_service::find_all(&state.pool, query).await?,
    ))
}

/// `GET /api/products/search` - search products.
///
/// `q` is matched as a case-insensitive substring against name, description,
/// brand and model; the list filters and pagination also apply. The meta
/// block echoes the query string.
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchProductsQuery>,
) -> Result<ApiResponse<PaginatedProducts>, AppError> {
    tracing::info!("GET /api/products/search - Query: {}", query.q);
    Ok(ApiResponse::success(
        product_service::search(&state.pool, query).await?,
    ))
}

/// `GET /api/products/{id}` - product details.
///
/// Returns 404 with `"Product with ID {id} not found"` when missing.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<ProductResponse>, AppError> {
    Ok(ApiResponse::success(
        product_service::find_one(&state.pool, id).await?,
    ))
}
