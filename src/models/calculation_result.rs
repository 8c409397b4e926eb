//! Calculation result models for the pricing engine.
//!
//! This module contains the [`PricingResult`] type and the structures it is
//! built from: resolved prices, rent quotes, per-line quotes, document
//! totals, booking overlaps and the audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BillingMode, BookableLineItem, PriceField, PricingContext};

/// The single authoritative monthly rate picked from a set of price fields.
///
/// `source` is `None` when no field held a positive value and the price
/// defaulted to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// The monthly rate, never negative.
    pub price: Decimal,
    /// The field the price was taken from.
    pub source: Option<PriceField>,
}

/// The billable amount for one booking window.
///
/// `daily_rate` and `rent_amount` are rounded independently for display and
/// persistence. The `raw_` values keep full precision for aggregation.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::models::{BillingMode, RentQuote};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let quote = RentQuote {
///     billing_mode: BillingMode::Prorata30,
///     monthly_rate: Decimal::from(9000),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     days: 10,
///     daily_rate: Decimal::from(300),
///     rent_amount: Decimal::from(3000),
///     raw_daily_rate: Decimal::from(300),
///     raw_rent_amount: Decimal::from(3000),
/// };
/// assert_eq!(quote.days, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentQuote {
    /// The pricing rule used.
    pub billing_mode: BillingMode,
    /// The monthly rate the quote was computed from.
    pub monthly_rate: Decimal,
    /// First billed day (inclusive).
    pub start_date: NaiveDate,
    /// Last billed day (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive number of billed days.
    pub days: u32,
    /// Daily rate rounded to 2 places.
    pub daily_rate: Decimal,
    /// Rent rounded to 2 places.
    pub rent_amount: Decimal,
    /// Daily rate at full precision.
    pub raw_daily_rate: Decimal,
    /// Rent at full precision.
    pub raw_rent_amount: Decimal,
}

/// The priced view of one line item inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemQuote {
    /// The line item this quote belongs to.
    pub item_id: String,
    /// The booked asset.
    pub asset_id: String,
    /// The effective monthly rate.
    pub effective_price: Decimal,
    /// The price field the effective rate came from.
    pub price_source: Option<PriceField>,
    /// Printing charges, added as-is.
    pub printing_charges: Decimal,
    /// Mounting charges, added as-is.
    pub mounting_charges: Decimal,
    /// The rent for the booking window.
    pub rent: RentQuote,
    /// Rent plus charges, rounded once.
    pub line_total: Decimal,
}

/// Aggregated totals for a booking document.
///
/// Every total is rounded once from full-precision sums, so `rent_total` can
/// differ from `rounded_lines_total` (the sum of the displayed per-line
/// amounts) by a few cents on large documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Number of priced line items.
    pub line_count: usize,
    /// Sum of booked days across all lines.
    pub total_booked_days: u64,
    /// `round(Σ raw rent)`.
    pub rent_total: Decimal,
    /// `Σ round(raw rent)`, what adding up the displayed lines gives.
    pub rounded_lines_total: Decimal,
    /// `rent_total - rounded_lines_total`.
    pub rounding_difference: Decimal,
    /// Sum of printing charges.
    pub printing_total: Decimal,
    /// Sum of mounting charges.
    pub mounting_total: Decimal,
    /// Rent plus charges, before tax.
    pub subtotal: Decimal,
    /// The tax percentage applied to the subtotal.
    pub tax_percent: Decimal,
    /// Tax on the subtotal.
    pub tax_amount: Decimal,
    /// Subtotal plus tax, rounded once.
    pub grand_total: Decimal,
}

/// Two line items booking the same asset over overlapping windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConflict {
    /// The doubly-booked asset.
    pub asset_id: String,
    /// The earlier of the two line items (by document order).
    pub first_item_id: String,
    /// The later of the two line items (by document order).
    pub second_item_id: String,
    /// First overlapping day.
    pub overlap_start: NaiveDate,
    /// Last overlapping day.
    pub overlap_end: NaiveDate,
    /// Inclusive number of overlapping days.
    pub overlap_days: u32,
}

/// The new schedule and derived amounts for one line item after a bulk edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemUpdate {
    /// The line item to update.
    pub item_id: String,
    /// New first day.
    pub start_date: NaiveDate,
    /// New last day.
    pub end_date: NaiveDate,
    /// New inclusive day count.
    pub booked_days: u32,
    /// The effective monthly rate used for the recalculation.
    pub effective_price: Decimal,
    /// Recomputed daily rate.
    pub daily_rate: Decimal,
    /// Recomputed rent.
    pub rent_amount: Decimal,
}

impl LineItemUpdate {
    /// Writes the update into a line item.
    ///
    /// Does nothing if the IDs do not match.
    pub fn apply_to(&self, item: &mut BookableLineItem) {
        if item.id != self.item_id {
            return;
        }
        item.start_date = self.start_date;
        item.end_date = self.end_date;
        item.booked_days = self.booked_days;
        item.daily_rate = self.daily_rate;
        item.rent_amount = self.rent_amount;
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The line item the step applies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data worth a second look without stopping the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of pricing a booking document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The priced document.
    pub document_id: String,
    /// Plan or campaign.
    pub context: PricingContext,
    /// One quote per line item, in document order.
    pub lines: Vec<LineItemQuote>,
    /// Aggregated totals.
    pub totals: DocumentTotals,
    /// Overlapping bookings of the same asset.
    pub conflicts: Vec<BookingConflict>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
