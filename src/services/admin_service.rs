//! Admin service - dashboard statistics and database maintenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::error::AppError;
use crate::services::product_service::{CategoryCount, round2};

/// Abbreviated product row for the "recent products" dashboard block.
#[derive(Debug, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProduct {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog-wide statistics for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_images: i64,
    pub avg_images_per_product: f64,
    pub products_by_category: Vec<CategoryCount>,
    pub recent_products: Vec<RecentProduct>,
}

/// Request body for the clear-database operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearDatabaseRequest {
    #[serde(default = "default_true")]
    pub delete_products: bool,

    #[serde(default)]
    pub delete_categories: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ClearDatabaseRequest {
    fn default() -> Self {
        Self {
            delete_products: true,
            delete_categories: false,
        }
    }
}

/// Row counts removed by a clear-database run.
#[derive(Debug, Serialize)]
pub struct DeletedCounts {
    pub products: i64,
    pub images: i64,
    pub categories: i64,
}

/// Result of a clear-database run. Carries its own `success` field, so the
/// response envelope passes it through unchanged.
#[derive(Debug, Serialize)]
pub struct ClearDatabaseResult {
    pub success: bool,
    pub message: String,
    pub deleted: DeletedCounts,
}

/// Aggregate catalog statistics.
pub async fn stats(pool: &DbPool) -> Result<AdminStats, AppError> {
    tracing::info!("Fetching admin statistics");

    let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    let total_categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    let total_images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
        .fetch_one(pool)
        .await?;

    let by_category: Vec<(Option<String>, i64)> =
        sqlx::query_as("SELECT category, COUNT(*) FROM products GROUP BY category")
            .fetch_all(pool)
            .await?;

    let recent_products: Vec<RecentProduct> = sqlx::query_as(
        r#"
        SELECT id, name, price, category, created_at
        FROM products
        ORDER BY created_at DESC
        LIMIT 5
        "#,
    )
    .fetch_all(pool)
    .await?;

    let avg_images_per_product = if total_products > 0 {
        round2(total_images as f64 / total_products as f64)
    } else {
        0.0
    };

    Ok(AdminStats {
        total_products,
        total_categories,
        total_images,
        avg_images_per_product,
        products_by_category: by_category
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        recent_products,
    })
}

/// Clear catalog data. Products and images are truncated together (TRUNCATE
/// is much faster than row-wise DELETE and resets the id sequences);
/// categories are only removed when explicitly requested.
pub async fn clear_database(
    pool: &DbPool,
    request: ClearDatabaseRequest,
) -> Result<ClearDatabaseResult, AppError> {
    tracing::info!(
        "Clearing database - products: {}, categories: {}",
        request.delete_products,
        request.delete_categories
    );

    let mut deleted = DeletedCounts {
        products: 0,
        images: 0,
        categories: 0,
    };

    if request.delete_products {
        // Count before truncating so the response can report what went away
        deleted.images = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(pool)
            .await?;
        deleted.products = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        sqlx::query(r#"TRUNCATE TABLE "images", "products" RESTART IDENTITY CASCADE"#)
            .execute(pool)
            .await?;
    }

    if request.delete_categories {
        let result = sqlx::query("DELETE FROM categories").execute(pool).await?;
        deleted.categories = result.rows_affected() as i64;
    }

    tracing::info!("Database cleared successfully");

    Ok(ClearDatabaseResult {
        success: true,
        message: "Database cleared successfully".to_string(),
        deleted,
    })
}
