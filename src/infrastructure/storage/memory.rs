//! In-memory storage implementation

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use log::warn;

use super::Storage;
use crate::domain::{DomainError, DomainResult, Product};
use crate::shared::types::pagination::Search;

/// In-memory storage for development and testing.
pub struct InMemoryStorage {
    products: DashMap<i64, Product>,
    product_counter: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            product_counter: AtomicI64::new(1),
        }
    }

    /// Storage pre-filled with a small demo catalog, used by the binary
    /// so the listing endpoint has something to page through.
    pub fn with_demo_data() -> Self {
        let storage = Self::new();

        let now = Utc::now();
        let demo = [
            ("Hex bolt M8", "fasteners", 12, true),
            ("Hex bolt M10", "fasteners", 18, true),
            ("Wood screw 4x40", "fasteners", 6, true),
            ("Claw hammer", "tools", 1450, true),
            ("Ball-peen hammer", "tools", 1690, false),
            ("Torque wrench", "tools", 8900, true),
            ("Phillips screwdriver", "tools", 590, true),
            ("Insulation tape", "electrical", 230, true),
            ("Cable tie 200mm", "electrical", 4, true),
            ("Junction box", "electrical", 340, true),
            ("Work gloves", "safety", 780, true),
            ("Safety goggles", "safety", 1250, true),
        ];

        for (i, (name, category, price_cents, is_active)) in demo.into_iter().enumerate() {
            let id = i as i64 + 1;
            storage.products.insert(
                id,
                Product {
                    id,
                    name: name.to_string(),
                    category: category.to_string(),
                    price_cents,
                    is_active,
                    created_at: now - Duration::days(demo.len() as i64 - i as i64),
                },
            );
        }
        storage
            .product_counter
            .store(demo.len() as i64 + 1, AtomicOrdering::SeqCst);

        storage
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_products(
        &self,
        searchs: &[Search],
        sort: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Product>, i64)> {
        for search in searchs {
            if !FILTER_COLUMNS.contains(&search.column.as_str())
                || !FILTER_ACTIONS.contains(&search.action.as_str())
            {
                warn!(
                    "Skipping unsupported filter {}.{}",
                    search.column, search.action
                );
            }
        }

        let mut matched: Vec<Product> = self
            .products
            .iter()
            .filter(|entry| {
                searchs
                    .iter()
                    .all(|search| filter_matches(entry.value(), search).unwrap_or(true))
            })
            .map(|entry| entry.value().clone())
            .collect();

        sort_products(&mut matched, sort);

        let total = matched.len() as i64;
        let rows: Vec<Product> = matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((rows, total))
    }

    async fn get_product(&self, id: i64) -> DomainResult<Option<Product>> {
        Ok(self.products.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save_product(&self, product: Product) -> DomainResult<Product> {
        if self.products.contains_key(&product.id) {
            return Err(DomainError::Conflict(format!("product {}", product.id)));
        }
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn next_product_id(&self) -> i64 {
        self.product_counter.fetch_add(1, AtomicOrdering::SeqCst)
    }
}

/// Columns the memory backend can filter on.
const FILTER_COLUMNS: &[&str] = &["id", "name", "category", "price_cents", "is_active"];

/// Filter actions the memory backend understands.
const FILTER_ACTIONS: &[&str] = &["eq", "ne", "contains", "gt", "gte", "lt", "lte"];

/// Whether `product` satisfies one search predicate.
///
/// Returns `None` for an unknown column or action; the caller treats that
/// as "filter does not apply" since action interpretation is this layer's
/// call and the pagination component never rejects a predicate.
fn filter_matches(product: &Product, search: &Search) -> Option<bool> {
    let value = match search.column.as_str() {
        "id" => product.id.to_string(),
        "name" => product.name.clone(),
        "category" => product.category.clone(),
        "price_cents" => product.price_cents.to_string(),
        "is_active" => product.is_active.to_string(),
        _ => return None,
    };

    match search.action.as_str() {
        "eq" => Some(value.eq_ignore_ascii_case(&search.query)),
        "ne" => Some(!value.eq_ignore_ascii_case(&search.query)),
        "contains" => Some(value.to_lowercase().contains(&search.query.to_lowercase())),
        "gt" | "gte" | "lt" | "lte" => {
            // Numeric comparison when both sides parse, lexicographic otherwise
            let ord = match (value.parse::<i64>(), search.query.parse::<i64>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => value.cmp(&search.query),
            };
            Some(match search.action.as_str() {
                "gt" => ord == Ordering::Greater,
                "gte" => ord != Ordering::Less,
                "lt" => ord == Ordering::Less,
                _ => ord != Ordering::Greater,
            })
        }
        _ => None,
    }
}

/// Order products by a raw `"<column> [asc|desc]"` expression.
///
/// Unknown columns fall back to `id desc` with a warning.
fn sort_products(products: &mut [Product], sort: &str) {
    let mut parts = sort.split_whitespace();
    let column = parts.next().unwrap_or("id");
    let descending = matches!(parts.next(), Some(dir) if dir.eq_ignore_ascii_case("desc"));

    let (column, descending) = match column {
        "id" | "name" | "category" | "price_cents" | "created_at" => (column, descending),
        other => {
            warn!("Unknown sort column {other:?}, falling back to id desc");
            ("id", true)
        }
    };

    products.sort_by(|a, b| {
        let ord = match column {
            "name" => a.name.cmp(&b.name),
            "category" => a.category.cmp(&b.category),
            "price_cents" => a.price_cents.cmp(&b.price_cents),
            "created_at" => a.created_at.cmp(&b.created_at),
            _ => a.id.cmp(&b.id),
        };
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn search(column: &str, action: &str, query: &str) -> Search {
        Search {
            column: column.to_string(),
            action: action.to_string(),
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn lists_one_page_with_total() {
        let storage = InMemoryStorage::with_demo_data();
        let (rows, total) = storage.list_products(&[], "id asc", 5, 0).await.unwrap();
        assert_eq!(total, 12);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].id, 1);
    }

    #[tokio::test]
    async fn default_sort_is_id_descending() {
        let storage = InMemoryStorage::with_demo_data();
        let (rows, _) = storage.list_products(&[], "id desc", 3, 0).await.unwrap();
        assert_eq!(rows[0].id, 12);
        assert_eq!(rows[2].id, 10);
    }

    #[tokio::test]
    async fn offset_beyond_data_returns_empty_page() {
        let storage = InMemoryStorage::with_demo_data();
        let (rows, total) = storage.list_products(&[], "id desc", 10, 40).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn eq_filter_narrows_by_category() {
        let storage = InMemoryStorage::with_demo_data();
        let filters = [search("category", "eq", "tools")];
        let (rows, total) = storage
            .list_products(&filters, "id asc", 50, 0)
            .await
            .unwrap();
        assert_eq!(total, 4);
        assert!(rows.iter().all(|p| p.category == "tools"));
    }

    #[tokio::test]
    async fn contains_filter_is_case_insensitive() {
        let storage = InMemoryStorage::with_demo_data();
        let filters = [search("name", "contains", "HAMMER")];
        let (_, total) = storage
            .list_products(&filters, "id asc", 50, 0)
            .await
            .unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn numeric_comparison_filters() {
        let storage = InMemoryStorage::with_demo_data();
        let filters = [search("price_cents", "gte", "1000")];
        let (rows, _) = storage
            .list_products(&filters, "price_cents asc", 50, 0)
            .await
            .unwrap();
        assert!(rows.iter().all(|p| p.price_cents >= 1000));
        assert!(rows.windows(2).all(|w| w[0].price_cents <= w[1].price_cents));
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let storage = InMemoryStorage::with_demo_data();
        let filters = [
            search("category", "eq", "tools"),
            search("is_active", "eq", "true"),
        ];
        let (_, total) = storage
            .list_products(&filters, "id asc", 50, 0)
            .await
            .unwrap();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn unknown_action_is_ignored() {
        let storage = InMemoryStorage::with_demo_data();
        let filters = [search("name", "soundslike", "hammer")];
        let (_, total) = storage
            .list_products(&filters, "id asc", 50, 0)
            .await
            .unwrap();
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn unknown_sort_column_falls_back_to_id_desc() {
        let storage = InMemoryStorage::with_demo_data();
        let (rows, _) = storage
            .list_products(&[], "password desc", 3, 0)
            .await
            .unwrap();
        assert_eq!(rows[0].id, 12);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let storage = InMemoryStorage::with_demo_data();
        let existing = storage.get_product(1).await.unwrap().unwrap();
        let err = storage.save_product(existing).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn next_product_id_is_monotonic() {
        let storage = InMemoryStorage::with_demo_data();
        let first = storage.next_product_id().await;
        let second = storage.next_product_id().await;
        assert_eq!(first, 13);
        assert_eq!(second, 14);
    }
}
