//! HTTP middleware components.

/// API key authentication gate
pub mod auth;
/// Outermost error-normalization boundary
pub mod errors;
