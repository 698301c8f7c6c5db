//! # Texnouz Catalog Service
//!
//! Paged product catalog REST service. The core of the crate is the
//! pagination component in [`shared::types::pagination`]: it parses
//! `limit`/`page`/`sort` and `column.action=value` search filters from the
//! query string, computes offset/page metadata for a known row count and
//! builds navigation links.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities and error types
//! - **shared**: Pagination component and validation helpers
//! - **infrastructure**: Storage trait and in-memory implementation
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::{InMemoryStorage, Storage};

// Re-export API router
pub use api::create_api_router;

// Re-export the pagination component
pub use shared::types::pagination::{PageRequest, Search};
