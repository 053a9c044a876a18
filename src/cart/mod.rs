//! Shopping cart
//!
//! The cart is an ordered list of [`CartLine`]s, at most one per product id,
//! every quantity at least 1. State transitions live in [`state`] and know
//! nothing about persistence; [`CartManager`] applies them and mirrors the
//! result to a [`CartStorage`](crate::storage::CartStorage) slot.

mod line;
mod manager;
pub mod state;
mod totals;

pub use line::CartLine;
pub use manager::{CartManager, CartUpdate, CART_STORAGE_KEY};
pub use state::QuantityChange;
pub use totals::{compute_totals, Totals, FREE_SHIPPING_THRESHOLD, SHIPPING_FEE, TAX_RATE};
