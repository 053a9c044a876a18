//! Product catalog types and the Fake Store API client
//!
//! Products are read-only records fetched from the remote catalog. The cart
//! copies the display fields it needs at add time and never re-syncs them.

mod client;

pub use client::{CatalogClient, CatalogError, DEFAULT_BASE_URL};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer rating summary attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating
    pub rate: f64,
    /// Number of ratings
    pub count: u32,
}

/// A product as served by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Image URL
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Rating as `(rate, count)`, zero when the catalog sent none
    pub fn rating_or_zero(&self) -> (f64, u32) {
        self.rating
            .as_ref()
            .map(|r| (r.rate, r.count))
            .unwrap_or((0.0, 0))
    }
}

/// Formats a category name for display by capitalizing each word
///
/// `"men's clothing"` becomes `"Men's Clothing"`.
pub fn format_category_name(category: &str) -> String {
    category
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
