//! Business logic services.
//!
//! Services contain the catalog logic separated from HTTP handlers: query
//! construction, relation loading, seeding and maintenance operations.

pub mod admin_service;
pub mod category_service;
pub mod product_service;
pub mod seed_service;
