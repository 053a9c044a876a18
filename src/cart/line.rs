use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One product entry in the cart
///
/// Display fields are copied from the catalog when the product is first
/// added. The serialized field names are the persisted slot layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u64,
    pub title: String,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line for `product` with quantity 1
    ///
    /// A negative catalog price is clamped to zero.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.max(Decimal::ZERO),
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity`, saturating at `Decimal::MAX`
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}
