//! Line item pricing and editing.
//!
//! Every edit to a line item's schedule goes through this module so that
//! `booked_days` always matches the dates and `rent_amount`/`daily_rate`
//! are always recomputed together. Edits work on a copy and only commit
//! when the whole recalculation succeeds.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::date_span::{DateSpan, days_between_inclusive, end_from_start_and_days};
use super::effective_price::resolve_with_audit;
use super::money::{checked_sum, round_money};
use super::prorata_rent::{compute_rent, compute_rent_with_audit};
use crate::config::BillingDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, BookableLineItem, LineItemQuote, PricingContext};

/// Creates the line item for an asset added to a booking document.
///
/// The card rate is copied in and the booking window defaults to the
/// document's. When the document has no end date the booking runs for the
/// configured default day count.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::create_line_item;
/// use ooh_pricing_engine::config::BillingDefaults;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let item = create_line_item(
///     "line_1",
///     "asset_001",
///     Decimal::from(6000),
///     start,
///     None,
///     &BillingDefaults::default(),
/// )?;
/// assert_eq!(item.booked_days, 30);
/// assert_eq!(item.end_date, NaiveDate::from_ymd_opt(2024, 3, 30).unwrap());
/// assert_eq!(item.rent_amount, Decimal::from(6000));
/// # Ok::<(), ooh_pricing_engine::error::EngineError>(())
/// ```
pub fn create_line_item(
    id: &str,
    asset_id: &str,
    card_rate: Decimal,
    document_start: NaiveDate,
    document_end: Option<NaiveDate>,
    defaults: &BillingDefaults,
) -> EngineResult<BookableLineItem> {
    if card_rate < Decimal::ZERO {
        return Err(EngineError::NegativeRate {
            field: "card_rate".to_string(),
            value: card_rate,
        });
    }

    let span = match document_end {
        Some(end) => DateSpan::new(document_start, end)?,
        None => DateSpan::from_start_and_days(document_start, defaults.default_booked_days)?,
    };

    let quote = compute_rent(card_rate, span.start(), span.end(), defaults.default_mode)?;

    Ok(BookableLineItem {
        id: id.to_string(),
        asset_id: asset_id.to_string(),
        card_rate,
        negotiated_price: None,
        negotiated_rate: None,
        sales_price: None,
        final_price: None,
        start_date: span.start(),
        end_date: span.end(),
        booked_days: quote.days,
        billing_mode: defaults.default_mode,
        printing_charges: Decimal::ZERO,
        mounting_charges: Decimal::ZERO,
        rent_amount: quote.rent_amount,
        daily_rate: quote.daily_rate,
    })
}

fn invalid(item: &BookableLineItem, message: impl Into<String>) -> EngineError {
    EngineError::InvalidLineItem {
        item_id: item.id.clone(),
        message: message.into(),
    }
}

/// Checks a line item's invariants.
///
/// The dates must form a valid window, `booked_days` must equal its
/// inclusive length, and the card rate and charges must not be negative.
pub fn validate_line_item(item: &BookableLineItem) -> EngineResult<()> {
    let days = days_between_inclusive(item.start_date, item.end_date)
        .map_err(|e| invalid(item, e.to_string()))?;

    if item.booked_days != days {
        return Err(invalid(
            item,
            format!(
                "booked_days {} does not match the {} days from {} to {}",
                item.booked_days, days, item.start_date, item.end_date
            ),
        ));
    }

    for (field, value) in [
        ("card_rate", item.card_rate),
        ("printing_charges", item.printing_charges),
        ("mounting_charges", item.mounting_charges),
    ] {
        if value < Decimal::ZERO {
            return Err(invalid(item, format!("{} must not be negative, got {}", field, value)));
        }
    }

    Ok(())
}

/// A line item quote with the audit steps and warnings it produced.
#[derive(Debug, Clone)]
pub struct LineQuoteResult {
    /// The priced line.
    pub quote: LineItemQuote,
    /// One step for the price resolution and one for the rent.
    pub audit_steps: Vec<AuditStep>,
    /// Data worth a second look.
    pub warnings: Vec<AuditWarning>,
}

/// Prices a validated line item, recording each decision.
pub fn quote_line_item_with_audit(
    item: &BookableLineItem,
    context: PricingContext,
    step_number: u32,
) -> EngineResult<LineQuoteResult> {
    validate_line_item(item)?;

    let price = resolve_with_audit(&item.price_inputs(), context, &item.id, step_number);
    let rent = compute_rent_with_audit(
        price.resolved.price,
        item.start_date,
        item.end_date,
        item.billing_mode,
        &item.id,
        step_number + 1,
    )?;

    let mut warnings = Vec::new();
    for candidate in &price.ignored {
        warnings.push(AuditWarning {
            code: "PRICE_OVERRIDE_IGNORED".to_string(),
            message: format!(
                "Line item '{}' has {} set to {}; treated as not negotiated",
                item.id,
                candidate.field,
                candidate.value.unwrap_or_default()
            ),
            severity: "low".to_string(),
        });
    }
    if price.resolved.source.is_none() {
        warnings.push(AuditWarning {
            code: "ZERO_EFFECTIVE_PRICE".to_string(),
            message: format!("Line item '{}' has no positive price and bills $0", item.id),
            severity: "medium".to_string(),
        });
    }

    let raw_line_total = checked_sum(
        [rent.quote.raw_rent_amount, item.printing_charges, item.mounting_charges],
        "line total",
    )?;
    let line_total = round_money(raw_line_total);

    Ok(LineQuoteResult {
        quote: LineItemQuote {
            item_id: item.id.clone(),
            asset_id: item.asset_id.clone(),
            effective_price: price.resolved.price,
            price_source: price.resolved.source,
            printing_charges: item.printing_charges,
            mounting_charges: item.mounting_charges,
            rent: rent.quote,
            line_total,
        },
        audit_steps: vec![price.audit_step, rent.audit_step],
        warnings,
    })
}

/// Prices a validated line item.
pub fn quote_line_item(
    item: &BookableLineItem,
    context: PricingContext,
) -> EngineResult<LineItemQuote> {
    quote_line_item_with_audit(item, context, 1).map(|result| result.quote)
}

/// Recomputes `booked_days`, `rent_amount` and `daily_rate` from the dates.
///
/// The item is left untouched if any check fails.
pub fn recalculate_line_item(
    item: &mut BookableLineItem,
    context: PricingContext,
) -> EngineResult<LineItemQuote> {
    let mut updated = item.clone();
    updated.booked_days = days_between_inclusive(updated.start_date, updated.end_date)?;

    let quote = quote_line_item(&updated, context)?;
    updated.rent_amount = quote.rent.rent_amount;
    updated.daily_rate = quote.rent.daily_rate;

    *item = updated;
    Ok(quote)
}

/// Moves a line item to a new booking window and reprices it.
pub fn set_line_dates(
    item: &mut BookableLineItem,
    start: NaiveDate,
    end: NaiveDate,
    context: PricingContext,
) -> EngineResult<LineItemQuote> {
    let span = DateSpan::new(start, end)?;

    let mut updated = item.clone();
    updated.start_date = span.start();
    updated.end_date = span.end();

    let quote = recalculate_line_item(&mut updated, context)?;
    *item = updated;
    Ok(quote)
}

/// Changes a line item's day count, keeping its start date, and reprices it.
pub fn set_line_booked_days(
    item: &mut BookableLineItem,
    days: u32,
    context: PricingContext,
) -> EngineResult<LineItemQuote> {
    let start = item.start_date;
    let end = end_from_start_and_days(start, days)?;
    set_line_dates(item, start, end, context)
}
