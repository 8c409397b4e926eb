//! Monetary rounding.
//!
//! Amounts are carried at full precision through every calculation and
//! rounded only when a value is produced for display or persistence.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places for displayed and persisted amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to [`MONEY_SCALE`] places, halves away from zero.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_money(Decimal::from_str("33.3333").unwrap()), Decimal::from_str("33.33").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Adds amounts, failing with [`EngineError::CalculationError`] on overflow.
///
/// `what` names the total in the error message.
pub fn checked_sum<I>(amounts: I, what: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("Overflow summing {}", what),
        })
}
