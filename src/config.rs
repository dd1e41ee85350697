//! Application configuration management.
//!
//! Configuration comes from environment variables, deserialized into a
//! type-safe struct with the `envy` crate. A local `.env` file is loaded
//! first when present, so `cargo run` works without exporting anything.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or any variable cannot
    /// be parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Optional .env file; a missing file is not an error
        dotenvy::dotenv().ok();

        // Field names map to upper-cased variables: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
