//! Category models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Represents a category record from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,

    pub name: String,

    /// URL-friendly unique identifier derived from the name
    /// (lower-cased, whitespace replaced with dashes)
    pub slug: String,

    pub created_at: DateTime<Utc>,
}

/// Category together with the number of products referencing it,
/// as returned by the category listing endpoint.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,

    /// Number of products assigned to this category
    pub product_count: i64,
}

/// Derive the unique slug for a category name.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
