//! Database seeding endpoint.

use axum::extract::State;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::services::seed_service::{self, SeedResult};
use crate::state::AppState;

/// `POST /api/seed` - initialize the database with API keys, default
/// categories and a sample product.
///
/// This endpoint is public: it is the bootstrap that mints the first keys,
/// so it cannot sit behind the key gate. Run once on first deployment.
///
/// # Response (201 Created)
///
/// ```json
/// {
///   "success": true,
///   "adminApiKey": "generated-uuid",
///   "readOnlyApiKey": "generated-uuid"
/// }
/// ```
pub async fn seed_database(State(state): State<AppState>) -> Result<ApiResponse<SeedResult>, AppError> {
    tracing::info!("POST /api/seed - Seeding database");
    let result = seed_service::seed(&state.pool).await?;
    Ok(ApiResponse::created(result))
}
