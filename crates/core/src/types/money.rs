//! Money arithmetic using decimal values.
//!
//! All monetary amounts are `rust_decimal::Decimal` in the currency's
//! standard unit (rupees, not paise). The payment gateway takes integer
//! minor units, so conversion lives here next to the tax math.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Tax applied at checkout: 2% of the cart subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Checkout totals derived from a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of `unit_price * quantity` over all lines.
    pub subtotal: Decimal,
    /// 2% of the subtotal, rounded to two decimal places.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals from a subtotal.
    ///
    /// Tax is rounded half-away-from-zero to two decimal places, matching
    /// conventional retail rounding.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// The total in integer minor units (paise), as the gateway expects.
    #[must_use]
    pub fn total_minor_units(&self) -> i64 {
        to_minor_units(self.total)
    }
}

/// Convert a standard-unit amount to integer minor units (x100).
///
/// Rounds half-away-from-zero to the nearest minor unit.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> i64 {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Format an amount with exactly two decimal places (e.g. "510.00").
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
