//! Product data models and API request/response types.
//!
//! This module defines:
//! - `Product` / `ProductImage`: database entities
//! - `ProductResponse`: product with its ordered images and category relation
//! - `CreateProductRequest` / `UpdateProductRequest`: write payloads
//! - `FilterProductsQuery` / `SearchProductsQuery`: list/search parameters
//! - `PaginationMeta` / `PaginatedProducts`: list result shape
//!
//! Wire casing is camelCase throughout (`minPrice`, `urlOriginal`,
//! `createdAt`, ...), matching what catalog clients already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::category::Category;

/// Represents a product record from the `products` table.
///
/// `category` holds the denormalized category name as provided at creation
/// time; `category_id` is the optional relation to the `categories` table
/// (kept in sync by the category upsert in the product service).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Option<String>,
    pub category_id: Option<i32>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,

    /// Free-form technical specifications, stored as JSONB
    pub specs: Option<Value>,

    /// URL of the listing this product was extracted from, if any
    pub url_original: Option<String>,
    pub extraction_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents an image record from the `images` table.
///
/// Images are returned ordered by `sort_order` ascending and are deleted
/// together with their product (ON DELETE CASCADE).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub url: String,

    #[serde(rename = "order")]
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
}

/// Product as returned to clients: the record itself plus its images and
/// resolved category relation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,

    pub images: Vec<ProductImage>,
    pub category_relation: Option<Category>,
}

/// One image in a create/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageInput {
    pub url: String,

    /// Explicit position; falls back to the 1-based payload index
    pub order: Option<i32>,
}

/// Request body for creating a product.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "iMac 24\" M1 2021",
///   "description": "iMac 24 with M1 chip, 8GB RAM, 256GB SSD.",
///   "price": 8500.0,
///   "category": "iMac",
///   "condition": "used",
///   "brand": "Apple",
///   "specs": { "processor": "Apple M1", "ram": "8GB" },
///   "images": [{ "url": "https://example.com/a.jpg", "order": 1 }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specs: Option<Value>,
    pub url_original: Option<String>,
    pub extraction_date: Option<DateTime<Utc>>,
    pub images: Option<Vec<ImageInput>>,
}

impl CreateProductRequest {
    /// Validate the payload, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name should not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("description should not be empty".to_string());
        }
        if self.price < 0.0 || !self.price.is_finite() {
            errors.push("price must be a positive number".to_string());
        }
        if let Some(images) = &self.images {
            for (index, image) in images.iter().enumerate() {
                if image.url.trim().is_empty() {
                    errors.push(format!("images.{index}.url should not be empty"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Request body for partially updating a product. Absent fields are left
/// unchanged; providing `images` replaces the existing set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specs: Option<Value>,
    pub url_original: Option<String>,
    pub extraction_date: Option<DateTime<Utc>>,
    pub images: Option<Vec<ImageInput>>,
}

impl UpdateProductRequest {
    /// Validate the provided fields, collecting one message per failure.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push("name should not be empty".to_string());
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            errors.push("description should not be empty".to_string());
        }
        if self.price.is_some_and(|p| p < 0.0 || !p.is_finite()) {
            errors.push("price must be a positive number".to_string());
        }
        if let Some(images) = &self.images {
            for (index, image) in images.iter().enumerate() {
                if image.url.trim().is_empty() {
                    errors.push(format!("images.{index}.url should not be empty"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Request body for bulk product creation.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCreateProductsRequest {
    pub products: Vec<CreateProductRequest>,
}

/// Query parameters shared by the list endpoint: pagination plus filters.
/// Text filters match case-insensitive substrings; prices are inclusive
/// bounds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterProductsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterProductsQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10)
    }

    /// Validate pagination bounds.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.page() < 1 {
            errors.push("page must not be less than 1".to_string());
        }
        if !(1..=100).contains(&self.limit()) {
            errors.push("limit must be between 1 and 100".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Query parameters for the search endpoint: a required query string over
/// name/description/brand/model plus the list filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsQuery {
    pub q: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
}

impl SearchProductsQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10)
    }

    /// Validate the query string and pagination bounds.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.q.trim().is_empty() {
            errors.push("q should not be empty".to_string());
        }
        if self.page() < 1 {
            errors.push("page must not be less than 1".to_string());
        }
        if !(1..=100).contains(&self.limit()) {
            errors.push("limit must be between 1 and 100".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Pagination block returned in the `meta` field of list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,

    /// Search query echoed back by the search endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: if limit > 0 { (total + limit - 1) / limit } else { 0 },
            query: None,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }
}

/// List/search result: hoisted by the response envelope into
/// `{"success": true, "data": [...], "meta": {...}}`.
#[derive(Debug, Serialize)]
pub struct PaginatedProducts {
    pub data: Vec<ProductResponse>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: "A product".to_string(),
            price,
            category: None,
            condition: None,
            brand: None,
            model: None,
            specs: None,
            url_original: None,
            extraction_date: None,
            images: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request("iMac", 8500.0).validate().is_ok());
    }

    #[test]
    fn validation_collects_all_field_errors() {
        let err = request("", -1.0).validate().unwrap_err();
        match err {
            AppError::Validation(messages) => {
                assert_eq!(
                    messages,
                    vec![
                        "name should not be empty".to_string(),
                        "price must be a positive number".to_string(),
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn pagination_defaults_and_total_pages() {
        let query = FilterProductsQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert!(query.validate().is_ok());

        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn out_of_range_pagination_is_rejected() {
        let query = FilterProductsQuery {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        };
        assert!(matches!(
            query.validate(),
            Err(AppError::Validation(messages)) if messages.len() == 2
        ));
    }
}
