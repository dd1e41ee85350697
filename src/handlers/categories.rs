//! Category endpoints.
//!
//! Listing is open to any valid key; deletion is admin-only (enforced by
//! the admin table, not by this handler).

use axum::extract::{Path, State};

use crate::error::AppError;
use crate::models::category::CategoryWithCount;
use crate::response::ApiResponse;
use crate::services::category_service::{self, DeleteResult};
use crate::state::AppState;

/// `GET /api/categories` - all categories with product counts, name
/// ascending.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryWithCount>>, AppError> {
    Ok(ApiResponse::success(
        category_service::find_all(&state.pool).await?,
    ))
}

/// `DELETE /api/categories/{id}` - delete a category (admin only).
///
/// Returns 404 with `"Category with ID {id} not found"` when missing.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<DeleteResult>, AppError> {
    tracing::info!("DELETE /api/categories/{}", id);
    Ok(ApiResponse::success(
        category_service::delete(&state.pool, id).await?,
    ))
}
