//! API key model for authentication.
//!
//! API keys are opaque strings presented in the `X-API-Key` header and looked
//! up by value on every request. Keys are revoked by flipping `is_active`,
//! never by deleting the row; the `is_admin` flag gates the admin-only
//! routes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Represents an API key record from the `api_keys` table.
///
/// The auth middleware treats this record as read-only: it is resolved once
/// per request and attached to the request context for handlers to consume.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    /// Unique identifier for this API key
    pub id: i32,

    /// The key value itself, matched against the `X-API-Key` header
    pub key: String,

    /// Human-readable label ("Admin Key", "Read-Only Key", ...)
    pub name: String,

    /// Inactive keys are rejected during authentication, which revokes
    /// access without losing the record
    pub is_active: bool,

    /// Whether this key may call admin-only routes
    pub is_admin: bool,

    /// Timestamp when this API key was created
    pub created_at: DateTime<Utc>,
}
