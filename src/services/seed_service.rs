//! Seed service - first-run initialization.
//!
//! Mints the initial API keys (one admin, one read-only), creates the
//! default categories and, when the catalog is empty, one sample product.
//! The generated key values are returned to the caller; this is the only
//! place a key value ever appears in a response.

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::product::{CreateProductRequest, ImageInput};
use crate::services::product_service;

/// Result of a seed run. Carries its own `success` field, so the response
/// envelope passes it through unchanged.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub success: bool,
    pub admin_api_key: String,
    pub read_only_api_key: String,
}

const DEFAULT_CATEGORIES: [&str; 5] = ["iMac", "MacBook", "Notebook", "Desktop", "Accessories"];

/// Seed the database. Idempotent for categories; every run mints a fresh
/// pair of keys.
pub async fn seed(pool: &DbPool) -> Result<SeedResult, AppError> {
    tracing::info!("Starting database seeding");

    let admin_api_key = create_key(pool, "Admin Key", true).await?;
    tracing::info!("Admin API key created");

    let read_only_api_key = create_key(pool, "Read-Only Key", false).await?;
    tracing::info!("Read-only API key created");

    for name in DEFAULT_CATEGORIES {
        product_service::upsert_category(pool, name).await?;
    }
    tracing::info!("Categories created");

    let existing_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if existing_products == 0 {
        let sample = product_service::create(pool, sample_product()).await?;
        tracing::info!("Sample product created: {}", sample.product.name);
    } else {
        tracing::info!(
            "Skipping sample product creation ({} products already exist)",
            existing_products
        );
    }

    tracing::info!("Database seeded successfully");

    Ok(SeedResult {
        success: true,
        admin_api_key,
        read_only_api_key,
    })
}

/// Insert a freshly generated key and return its value.
async fn create_key(pool: &DbPool, name: &str, is_admin: bool) -> Result<String, AppError> {
    let key = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO api_keys (key, name, is_active, is_admin)
        VALUES ($1, $2, TRUE, $3)
        ON CONFLICT (key) DO NOTHING
        "#,
    )
    .bind(&key)
    .bind(name)
    .bind(is_admin)
    .execute(pool)
    .await?;

    Ok(key)
}

/// The demo catalog entry created on first seed.
fn sample_product() -> CreateProductRequest {
    CreateProductRequest {
        name: "iMac 24\" M1 2021".to_string(),
        description: "24-inch iMac with the M1 chip, 8GB RAM, 256GB SSD. \
                      Lightly used, all original accessories included."
            .to_string(),
        price: 8500.0,
        category: Some("iMac".to_string()),
        condition: Some("used".to_string()),
        brand: Some("Apple".to_string()),
        model: Some("iMac 24\" M1".to_string()),
        specs: Some(json!({
            "processor": "Apple M1",
            "ram": "8GB",
            "storage": "256GB SSD",
            "screen": "24-inch 4.5K Retina",
        })),
        url_original: None,
        extraction_date: None,
        images: Some(vec![
            ImageInput {
                url: "https://upload.wikimedia.org/wikipedia/commons/b/bf/IMac_M4_2024.jpg"
                    .to_string(),
                order: Some(1),
            },
            ImageInput {
                url: "https://cdn.pixabay.com/photo/2021/04/21/15/25/imac-6196689_1280.png"
                    .to_string(),
                order: Some(2),
            },
        ]),
    }
}
