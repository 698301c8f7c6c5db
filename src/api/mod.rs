//! REST API module for the catalog service
//!
//! Provides HTTP endpoints for listing and managing catalog products,
//! with pagination, sorting and field-based search filters.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use router::create_api_router;
