//! Order totals
//!
//! All arithmetic is exact decimal. Only the reported figures are rounded.

use rust_decimal::{Decimal, RoundingStrategy};

use super::CartLine;

/// Sales tax applied to the subtotal (10%)
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotals strictly above this ship free
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat shipping fee below the threshold
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// Cart totals, each rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    /// Sum of the three rounded figures above
    pub total: Decimal,
}

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes subtotal, tax, shipping, and total for a set of lines
///
/// The free-shipping check uses the exact subtotal, before rounding.
pub fn compute_totals(lines: &[CartLine]) -> Totals {
    let subtotal = lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let tax = subtotal.saturating_mul(TAX_RATE);
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        SHIPPING_FEE
    };

    let subtotal = to_cents(subtotal);
    let tax = to_cents(tax);
    let shipping = to_cents(shipping);

    Totals {
        subtotal,
        tax,
        shipping,
        total: subtotal.saturating_add(tax).saturating_add(shipping),
    }
}
