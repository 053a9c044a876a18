//! Pure cart state transitions
//!
//! Every function here takes the line list by `&mut` and keeps the cart
//! invariants: at most one line per product id, no line with quantity 0, and
//! no negative price.

use std::collections::HashSet;

use super::CartLine;
use crate::catalog::Product;

/// What `set_quantity` did to the cart
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// The line now has the requested quantity
    Updated(CartLine),
    /// A non-positive quantity removed the line
    Removed(CartLine),
    /// No line had that id, or a non-positive quantity hit an absent id
    Unchanged,
}

/// Adds one unit of `product`, appending a new line if it is not in the cart yet
///
/// Returns the line after the change.
pub fn add<'a>(lines: &'a mut Vec<CartLine>, product: &Product) -> &'a CartLine {
    match lines.iter().position(|line| line.id == product.id) {
        Some(index) => {
            let line = &mut lines[index];
            line.quantity = line.quantity.saturating_add(1);
            line
        }
        None => {
            lines.push(CartLine::from_product(product));
            &lines[lines.len() - 1]
        }
    }
}

/// Removes the line for `id`, returning it if there was one
pub fn remove(lines: &mut Vec<CartLine>, id: u64) -> Option<CartLine> {
    let index = lines.iter().position(|line| line.id == id)?;
    Some(lines.remove(index))
}

/// Sets the quantity of an existing line
///
/// A quantity of zero or less removes the line. An id that is not in the cart
/// is left alone; nothing gets inserted. Quantities beyond `u32::MAX` are
/// clamped.
pub fn set_quantity(lines: &mut Vec<CartLine>, id: u64, quantity: i64) -> QuantityChange {
    if quantity <= 0 {
        return match remove(lines, id) {
            Some(line) => QuantityChange::Removed(line),
            None => QuantityChange::Unchanged,
        };
    }

    match lines.iter_mut().find(|line| line.id == id) {
        Some(line) => {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            QuantityChange::Updated(line.clone())
        }
        None => QuantityChange::Unchanged,
    }
}

/// Total number of units across all lines
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Restores the invariants on lines that came from outside (persisted data)
///
/// Drops zero-quantity and negative-price lines and keeps only the first
/// line for a repeated id.
pub fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| line.quantity >= 1 && !line.price.is_sign_negative())
        .filter(|line| seen.insert(line.id))
        .collect()
}
