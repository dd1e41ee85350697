//! Admin product CRUD endpoints. All routes here are in the admin table and
//! therefore require a key with `is_admin = true`.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::product::{
    BulkCreateProductsRequest, CreateProductRequest, ProductResponse, UpdateProductRequest,
};
use crate::response::ApiResponse;
use crate::services::product_service::{self, BulkCreateResult, DeleteResult, ProductStats};
use crate::state::AppState;

/// `POST /api/admin/products` - create a product.
///
/// An optional `category` name is slugified and upserted; optional `images`
/// are created with a 1-based default ordering. Returns 201 with the full
/// product including images and category relation.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateProductRequest>,
) -> Result<ApiResponse<ProductResponse>, AppError> {
    tracing::info!(
        "POST /api/admin/products - Creating: {} (key: {})",
        request.name,
        auth.api_key.name
    );
    Ok(ApiResponse::created(
        product_service::create(&state.pool, request).await?,
    ))
}

/// `POST /api/admin/products/bulk` - create many products.
///
/// Items are created one by one; a failing item is logged and skipped.
///
/// # Response (201 Created)
///
/// ```json
/// { "success": true, "data": { "created": 9, "total": 10, "products": [...] } }
/// ```
pub async fn bulk_create_products(
    State(state): State<AppState>,
    Json(request): Json<BulkCreateProductsRequest>,
) -> Result<ApiResponse<BulkCreateResult>, AppError> {
    tracing::info!(
        "POST /api/admin/products/bulk - Creating {} products",
        request.products.len()
    );
    Ok(ApiResponse::created(
        product_service::bulk_create(&state.pool, request).await?,
    ))
}

/// `PATCH /api/admin/products/{id}` - partial update.
///
/// Absent fields are left unchanged; providing `images` replaces the
/// existing set. Returns 404 when the product does not exist.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<ApiResponse<ProductResponse>, AppError> {
    tracing::info!("PATCH /api/admin/products/{}", id);
    Ok(ApiResponse::success(
        product_service::update(&state.pool, id, request).await?,
    ))
}

/// `DELETE /api/admin/products/{id}` - delete a product and its images.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResult>, AppError> {
    tracing::info!("DELETE /api/admin/products/{}", id);
    Ok(ApiResponse::success(
        product_service::remove(&state.pool, id).await?,
    ))
}

/// `GET /api/admin/products/stats` - product statistics.
pub async fn product_stats(
    State(state): State<AppState>,
) -> Result<ApiResponse<ProductStats>, AppError> {
    Ok(ApiResponse::success(
        product_service::stats(&state.pool).await?,
    ))
}
