//! Currency rounding.
//!
//! Monetary values are carried as `f64` and rounded to cents only when they
//! leave the service. Rounding goes through [`Decimal`] so that the exact
//! binary value of the float decides the direction, and ties go to even.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places monetary values are rounded to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary value to two decimal places.
///
/// Values too large to be represented as a [`Decimal`] are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use payroll_service::calculation::round_currency;
///
/// assert_eq!(round_currency(1234.5678), 1234.57);
/// // 2.675 is stored as 2.67499999... so it rounds down.
/// assert_eq!(round_currency(2.675), 2.67);
/// ```
pub fn round_currency(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };

    exact
        .round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .unwrap_or(value)
}
