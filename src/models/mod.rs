//! Data models representing database entities and API request types.

/// API key authentication model
pub mod api_key;
/// Product category model
pub mod category;
/// Product, image and catalog request/response models
pub mod product;
