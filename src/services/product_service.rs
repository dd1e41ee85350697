//! Product service - catalog CRUD, filtering, search and statistics.
//!
//! Filtering, searching and pagination are delegated to PostgreSQL: text
//! filters become case-insensitive `ILIKE` substring matches, price bounds
//! become inclusive comparisons, and list results are paged with
//! `LIMIT`/`OFFSET` plus a matching `COUNT(*)`.

use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::category::{Category, slugify};
use crate::models::product::{
    BulkCreateProductsRequest, CreateProductRequest, FilterProductsQuery, ImageInput,
    PaginatedProducts, PaginationMeta, Product, ProductImage, ProductResponse,
    SearchProductsQuery, UpdateProductRequest,
};

/// Result of deleting a product.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub message: String,
}

/// Result of a bulk creation run: failures are skipped, not fatal.
#[derive(Debug, Serialize)]
pub struct BulkCreateResult {
    pub created: usize,
    pub total: usize,
    pub products: Vec<ProductResponse>,
}

/// Per-category product count for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

/// Per-condition product count for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct ConditionCount {
    pub condition: Option<String>,
    pub count: i64,
}

/// Product statistics for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: i64,
    pub avg_price: f64,
    pub products_by_category: Vec<CategoryCount>,
    pub products_by_condition: Vec<ConditionCount>,
}

/// Create a product, upserting its category and inserting its images in one
/// database transaction.
pub async fn create(
    pool: &DbPool,
    request: CreateProductRequest,
) -> Result<ProductResponse, AppError> {
    request.validate()?;
    tracing::info!("Creating product: {}", request.name);

    let category_id = match &request.category {
        Some(name) => Some(upsert_category(pool, name).await?.id),
        None => None,
    };

    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            name, description, price, category, category_id, condition,
            brand, model, specs, url_original, extraction_date
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.price)
    .bind(&request.category)
    .bind(category_id)
    .bind(&request.condition)
    .bind(&request.brand)
    .bind(&request.model)
    .bind(&request.specs)
    .bind(&request.url_original)
    .bind(request.extraction_date)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(images) = &request.images {
        insert_images(&mut tx, product.id, images).await?;
    }

    tx.commit().await?;

    load_response(pool, product.id).await
}

/// List products with filters and pagination.
pub async fn find_all(
    pool: &DbPool,
    query: FilterProductsQuery,
) -> Result<PaginatedProducts, AppError> {
    query.validate()?;

    let page = query.page();
    let limit = query.limit();
    let offset = (page - 1) * limit;

    let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM products");
    push_filters(&mut select, &query, None);
    select
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let products: Vec<Product> = select.build_query_as().fetch_all(pool).await?;

    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
    push_filters(&mut count, &query, None);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    Ok(PaginatedProducts {
        data: attach_relations(pool, products).await?,
        meta: PaginationMeta::new(page, limit, total),
    })
}

/// Fetch a single product with its images and category relation.
pub async fn find_one(pool: &DbPool, id: i32) -> Result<ProductResponse, AppError> {
    ensure_exists(pool, id).await?;
    load_response(pool, id).await
}

/// Search products by substring over name, description, brand and model,
/// with the same filters and pagination as the list endpoint.
pub async fn search(
    pool: &DbPool,
    query: SearchProductsQuery,
) -> Result<PaginatedProducts, AppError> {
    query.validate()?;

    let page = query.page();
    let limit = query.limit();
    let offset = (page - 1) * limit;

    let filters = FilterProductsQuery {
        category: query.category.clone(),
        brand: query.brand.clone(),
        condition: query.condition.clone(),
        ..Default::default()
    };

    let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM products");
    push_filters(&mut select, &filters, Some(&query.q));
    select
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let products: Vec<Product> = select.build_query_as().fetch_all(pool).await?;

    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
    push_filters(&mut count, &filters, Some(&query.q));
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    Ok(PaginatedProducts {
        data: attach_relations(pool, products).await?,
        meta: PaginationMeta::new(page, limit, total).with_query(&query.q),
    })
}

/// Partially update a product. Providing `images` replaces the existing set;
/// providing `category` upserts it and relinks the product.
pub async fn update(
    pool: &DbPool,
    id: i32,
    request: UpdateProductRequest,
) -> Result<ProductResponse, AppError> {
    request.validate()?;
    ensure_exists(pool, id).await?;
    tracing::info!("Updating product: {}", id);

    let category_id = match &request.category {
        Some(name) => Some(upsert_category(pool, name).await?.id),
        None => None,
    };

    let mut tx = pool.begin().await?;

    let mut update = QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = NOW()");
    if let Some(name) = &request.name {
        update.push(", name = ").push_bind(name);
    }
    if let Some(description) = &request.description {
        update.push(", description = ").push_bind(description);
    }
    if let Some(price) = request.price {
        update.push(", price = ").push_bind(price);
    }
    if let Some(category) = &request.category {
        update.push(", category = ").push_bind(category);
    }
    if let Some(category_id) = category_id {
        update.push(", category_id = ").push_bind(category_id);
    }
    if let Some(condition) = &request.condition {
        update.push(", condition = ").push_bind(condition);
    }
    if let Some(brand) = &request.brand {
        update.push(", brand = ").push_bind(brand);
    }
    if let Some(model) = &request.model {
        update.push(", model = ").push_bind(model);
    }
    if let Some(specs) = &request.specs {
        update.push(", specs = ").push_bind(specs);
    }
    if let Some(url_original) = &request.url_original {
        update.push(", url_original = ").push_bind(url_original);
    }
    if let Some(extraction_date) = request.extraction_date {
        update.push(", extraction_date = ").push_bind(extraction_date);
    }
    update.push(" WHERE id = ").push_bind(id);
    update.build().execute(&mut *tx).await?;

    if let Some(images) = &request.images {
        sqlx::query("DELETE FROM images WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, images).await?;
    }

    tx.commit().await?;

    load_response(pool, id).await
}

/// Delete a product; its images go with it via ON DELETE CASCADE.
pub async fn remove(pool: &DbPool, id: i32) -> Result<DeleteResult, AppError> {
    ensure_exists(pool, id).await?;
    tracing::info!("Deleting product: {}", id);

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(DeleteResult {
        message: "Product deleted successfully".to_string(),
    })
}

/// Create many products in one call. Each item is created independently;
/// failures are logged and skipped so one bad row does not abort the batch.
pub async fn bulk_create(
    pool: &DbPool,
    request: BulkCreateProductsRequest,
) -> Result<BulkCreateResult, AppError> {
    if request.products.is_empty() {
        return Err(AppError::Validation(vec![
            "products should not be empty".to_string(),
        ]));
    }

    let total = request.products.len();
    tracing::info!("Bulk creating {} products", total);

    let mut products = Vec::new();
    for item in request.products {
        let name = item.name.clone();
        match create(pool, item).await {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::error!("Error creating product {}: {}", name, e);
            }
        }
    }

    Ok(BulkCreateResult {
        created: products.len(),
        total,
        products,
    })
}

/// Aggregate product statistics for the admin dashboard.
pub async fn stats(pool: &DbPool) -> Result<ProductStats, AppError> {
    let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    let avg_price: Option<f64> = sqlx::query_scalar("SELECT AVG(price) FROM products")
        .fetch_one(pool)
        .await?;

    let by_category: Vec<(Option<String>, i64)> = sqlx::query_as(
        "SELECT category, COUNT(*) FROM products GROUP BY category",
    )
    .fetch_all(pool)
    .await?;

    let by_condition: Vec<(Option<String>, i64)> = sqlx::query_as(
        "SELECT condition, COUNT(*) FROM products GROUP BY condition",
    )
    .fetch_all(pool)
    .await?;

    Ok(ProductStats {
        total_products,
        avg_price: round2(avg_price.unwrap_or(0.0)),
        products_by_category: by_category
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        products_by_condition: by_condition
            .into_iter()
            .map(|(condition, count)| ConditionCount { condition, count })
            .collect(),
    })
}

/// Round to two decimal places for display values.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Find or create a category by name; the slug is the conflict target so the
/// same name always resolves to the same row.
pub async fn upsert_category(pool: &DbPool, name: &str) -> Result<Category, AppError> {
    let slug = slugify(name);

    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name, slug)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id, name, slug, created_at
        "#,
    )
    .bind(name)
    .bind(&slug)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

/// 404 with the canonical message when the product does not exist.
async fn ensure_exists(pool: &DbPool, id: i32) -> Result<(), AppError> {
    let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match exists {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!(
            "Product with ID {id} not found"
        ))),
    }
}

/// Insert the images of a payload, defaulting order to the 1-based index.
async fn insert_images(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    product_id: i32,
    images: &[ImageInput],
) -> Result<(), AppError> {
    for (index, image) in images.iter().enumerate() {
        let order = image.order.unwrap_or(index as i32 + 1);
        sqlx::query("INSERT INTO images (product_id, url, sort_order) VALUES ($1, $2, $3)")
            .bind(product_id)
            .bind(&image.url)
            .bind(order)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Load one product with its ordered images and category relation.
async fn load_response(pool: &DbPool, id: i32) -> Result<ProductResponse, AppError> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {id} not found")))?;

    let mut responses = attach_relations(pool, vec![product]).await?;
    // attach_relations preserves its input; exactly one element here
    responses
        .pop()
        .ok_or_else(|| AppError::Internal("Product vanished while loading relations".to_string()))
}

/// Batch-load images and category relations for a page of products.
async fn attach_relations(
    pool: &DbPool,
    products: Vec<Product>,
) -> Result<Vec<ProductResponse>, AppError> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let category_ids: Vec<i32> = products.iter().filter_map(|p| p.category_id).collect();

    let images: Vec<ProductImage> = sqlx::query_as(
        r#"
        SELECT id, product_id, url, sort_order, created_at
        FROM images
        WHERE product_id = ANY($1)
        ORDER BY sort_order ASC
        "#,
    )
    .bind(&product_ids)
    .fetch_all(pool)
    .await?;

    let categories: Vec<Category> = if category_ids.is_empty() {
        Vec::new()
    } else {
        sqlx::query_as(
            "SELECT id, name, slug, created_at FROM categories WHERE id = ANY($1)",
        )
        .bind(&category_ids)
        .fetch_all(pool)
        .await?
    };

    let responses = products
        .into_iter()
        .map(|product| {
            let product_images = images
                .iter()
                .filter(|image| image.product_id == product.id)
                .cloned()
                .collect();
            let category_relation = product
                .category_id
                .and_then(|cid| categories.iter().find(|c| c.id == cid).cloned());
            ProductResponse {
                product,
                images: product_images,
                category_relation,
            }
        })
        .collect();

    Ok(responses)
}

/// Append the shared filter conditions (and optionally the search predicate)
/// to a `SELECT`/`COUNT` statement.
fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &FilterProductsQuery,
    search: Option<&str>,
) {
    let mut separator = " WHERE ";

    if let Some(q) = search {
        let pattern = format!("%{q}%");
        builder.push(separator).push("(");
        builder.push("name ILIKE ").push_bind(pattern.clone());
        builder.push(" OR description ILIKE ").push_bind(pattern.clone());
        builder.push(" OR brand ILIKE ").push_bind(pattern.clone());
        builder.push(" OR model ILIKE ").push_bind(pattern);
        builder.push(")");
        separator = " AND ";
    }

    if let Some(category) = &filters.category {
        builder
            .push(separator)
            .push("category ILIKE ")
            .push_bind(format!("%{category}%"));
        separator = " AND ";
    }
    if let Some(brand) = &filters.brand {
        builder
            .push(separator)
            .push("brand ILIKE ")
            .push_bind(format!("%{brand}%"));
        separator = " AND ";
    }
    if let Some(condition) = &filters.condition {
        builder
            .push(separator)
            .push("condition ILIKE ")
            .push_bind(format!("%{condition}%"));
        separator = " AND ";
    }
    if let Some(min_price) = filters.min_price {
        builder
            .push(separator)
            .push("price >= ")
            .push_bind(min_price);
        separator = " AND ";
    }
    if let Some(max_price) = filters.max_price {
        builder
            .push(separator)
            .push("price <= ")
            .push_bind(max_price);
    }
}
