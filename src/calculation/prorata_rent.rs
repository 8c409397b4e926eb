//! Pro-rata rent calculation.
//!
//! Converts a monthly rate into the billable amount for an inclusive
//! booking window. Under `PRORATA_30` the monthly rate is spread over a
//! fixed 30-day month and charged per booked day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::date_span::days_between_inclusive;
use super::money::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BillingMode, RentQuote};

/// Computes the rent and daily rate for a booking window.
///
/// `rent_amount` is rounded once from the full-precision rent; it is not
/// `daily_rate * days`, which would compound the daily rounding error.
/// The unrounded values are kept on the quote for aggregation.
///
/// # Errors
///
/// - [`EngineError::NegativeRate`] if `monthly_rate` is negative
/// - [`EngineError::InvalidDateRange`] if `end < start`
/// - [`EngineError::CalculationError`] on decimal overflow
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::compute_rent;
/// use ooh_pricing_engine::models::BillingMode;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let quote = compute_rent(
///     Decimal::from(9000),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     BillingMode::Prorata30,
/// )?;
/// assert_eq!(quote.days, 10);
/// assert_eq!(quote.daily_rate, Decimal::from(300));
/// assert_eq!(quote.rent_amount, Decimal::from(3000));
/// # Ok::<(), ooh_pricing_engine::error::EngineError>(())
/// ```
pub fn compute_rent(
    monthly_rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    billing_mode: BillingMode,
) -> EngineResult<RentQuote> {
    if monthly_rate < Decimal::ZERO {
        return Err(EngineError::NegativeRate {
            field: "monthly_rate".to_string(),
            value: monthly_rate,
        });
    }

    let days = days_between_inclusive(start, end)?;

    let (raw_daily_rate, raw_rent_amount) = match billing_mode {
        BillingMode::Prorata30 => prorate(monthly_rate, days, billing_mode.base_days())?,
    };

    Ok(RentQuote {
        billing_mode,
        monthly_rate,
        start_date: start,
        end_date: end,
        days,
        daily_rate: round_money(raw_daily_rate),
        rent_amount: round_money(raw_rent_amount),
        raw_daily_rate,
        raw_rent_amount,
    })
}

/// Same as [`compute_rent`], with the billing mode given by name.
///
/// Any name other than `PRORATA_30` fails with
/// [`EngineError::UnsupportedBillingMode`].
pub fn compute_rent_for_mode(
    monthly_rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    billing_mode: &str,
) -> EngineResult<RentQuote> {
    let mode: BillingMode = billing_mode.parse()?;
    compute_rent(monthly_rate, start, end, mode)
}

/// Returns `(daily, rent)` at full precision for a fixed-length month.
fn prorate(monthly_rate: Decimal, days: u32, base_days: u32) -> EngineResult<(Decimal, Decimal)> {
    let base = Decimal::from(base_days);
    let overflow = || EngineError::CalculationError {
        message: format!(
            "Overflow pro-rating {} over {} of {} days",
            monthly_rate, days, base_days
        ),
    };

    let daily = monthly_rate.checked_div(base).ok_or_else(overflow)?;
    // multiply before dividing so a whole month comes back exact
    let rent = monthly_rate
        .checked_mul(Decimal::from(days))
        .and_then(|total| total.checked_div(base))
        .ok_or_else(overflow)?;

    Ok((daily, rent))
}

/// The result of a rent calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct RentCalculationResult {
    /// The computed quote.
    pub quote: RentQuote,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes a line item's rent and records the calculation.
pub fn compute_rent_with_audit(
    monthly_rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    billing_mode: BillingMode,
    item_id: &str,
    step_number: u32,
) -> EngineResult<RentCalculationResult> {
    let quote = compute_rent(monthly_rate, start, end, billing_mode)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "prorata_rent".to_string(),
        rule_name: "Pro-Rata Rent".to_string(),
        item_id: Some(item_id.to_string()),
        input: serde_json::json!({
            "monthly_rate": monthly_rate.to_string(),
            "start_date": start.to_string(),
            "end_date": end.to_string(),
            "billing_mode": billing_mode.as_str(),
        }),
        output: serde_json::json!({
            "days": quote.days,
            "daily_rate": quote.daily_rate.to_string(),
            "rent_amount": quote.rent_amount.to_string(),
        }),
        reasoning: format!(
            "${} / {} x {} days = ${}",
            monthly_rate.normalize(),
            billing_mode.base_days(),
            quote.days,
            quote.rent_amount
        ),
    };

    Ok(RentCalculationResult { quote, audit_step })
}
