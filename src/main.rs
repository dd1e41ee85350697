//! Product Catalog API - Main Application Entry Point
//!
//! REST API server for a product catalog: products, categories, images and
//! the API keys that guard them.
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load configuration from environment variables
//! 3. Create the database connection pool and run migrations
//! 4. Build the HTTP router with the auth gate and error boundary
//! 5. Start serving on the configured port

use product_catalog_api::{app, config, db, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = app(AppState::new(pool));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
