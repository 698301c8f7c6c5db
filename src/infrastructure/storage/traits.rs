//! Storage trait definitions

use async_trait::async_trait;

use crate::domain::{DomainResult, Product};
use crate::shared::types::pagination::Search;

/// Storage trait for catalog persistence.
///
/// `list_products` is the data-layer half of the pagination contract: it
/// applies the search predicates, orders by the raw sort expression, slices
/// by limit/offset and reports the total (pre-slice) row count so the
/// caller can compute page metadata.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_products(
        &self,
        searchs: &[Search],
        sort: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Product>, i64)>;

    async fn get_product(&self, id: i64) -> DomainResult<Option<Product>>;

    async fn save_product(&self, product: Product) -> DomainResult<Product>;

    // Utility
    async fn next_product_id(&self) -> i64;
}
