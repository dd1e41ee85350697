//! Category service - listing with product counts, deletion.

use serde::Serialize;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::category::CategoryWithCount;

/// Result of deleting a category.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub message: String,
}

/// List all categories alphabetically with the number of products in each.
pub async fn find_all(pool: &DbPool) -> Result<Vec<CategoryWithCount>, AppError> {
    tracing::info!("Fetching all categories");

    let categories = sqlx::query_as::<_, CategoryWithCount>(
        r#"
        SELECT c.id, c.name, c.slug, c.created_at, COUNT(p.id) AS product_count
        FROM categories c
        LEFT JOIN products p ON p.category_id = c.id
        GROUP BY c.id, c.name, c.slug, c.created_at
        ORDER BY c.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Delete a category. Products keep their denormalized category name; the
/// relation is nulled out by ON DELETE SET NULL.
pub async fn delete(pool: &DbPool, id: i32) -> Result<DeleteResult, AppError> {
    let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Category with ID {id} not found"
        )));
    }

    tracing::info!("Deleting category: {}", id);
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(DeleteResult {
        message: "Category deleted successfully".to_string(),
    })
}
