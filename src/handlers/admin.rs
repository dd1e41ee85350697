//! Admin dashboard and maintenance endpoints (admin key required).

use axum::{Extension, Json, extract::State};

use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::response::ApiResponse;
use crate::services::admin_service::{
    self, AdminStats, ClearDatabaseRequest, ClearDatabaseResult,
};
use crate::state::AppState;

/// `GET /api/admin/stats` - catalog-wide statistics.
pub async fn admin_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<ApiResponse<AdminStats>, AppError> {
    tracing::info!("GET /api/admin/stats (key: {})", auth.api_key.name);
    Ok(ApiResponse::success(admin_service::stats(&state.pool).await?))
}

/// `POST /api/admin/clear-database` - wipe catalog data.
///
/// # Request Body (optional)
///
/// ```json
/// { "deleteProducts": true, "deleteCategories": false }
/// ```
///
/// Products and images are truncated together; categories only go when
/// `deleteCategories` is set. The response reports the removed row counts.
pub async fn clear_database(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    request: Option<Json<ClearDatabaseRequest>>,
) -> Result<ApiResponse<ClearDatabaseResult>, AppError> {
    tracing::warn!(
        "POST /api/admin/clear-database (key: {})",
        auth.api_key.name
    );
    let request = request.map(|Json(r)| r).unwrap_or_default();
    Ok(ApiResponse::success(
        admin_service::clear_database(&state.pool, request).await?,
    ))
}
