//! Product catalog entity

use chrono::{DateTime, Utc};

/// One catalog entry.
///
/// Prices are stored as integer cents; rendering as a decimal is a
/// presentation concern.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
