//! Pricing logic for out-of-home bookings.
//!
//! This module contains the effective price resolver, inclusive date-span
//! arithmetic, PRORATA_30 rent calculation, line item editing, bulk
//! schedule edits, document totals and booking overlap detection.

mod booking_conflict;
mod bulk_schedule;
mod date_span;
mod document_pricing;
mod document_totals;
mod effective_price;
mod line_item;
mod money;
mod prorata_rent;

pub use booking_conflict::detect_booking_conflicts;
pub use bulk_schedule::{BulkScheduleEdit, BulkSelection, apply_updates, plan_bulk_schedule};
pub use date_span::{
    CANONICAL_DATE_FORMAT, DateSpan, anchor_at_local_noon, days_between_inclusive,
    end_from_start_and_days, from_canonical_date_string, parse_canonical_date,
    to_canonical_date_string,
};
pub use document_pricing::price_document;
pub use document_totals::{RentAggregate, aggregate_rent, calculate_document_totals};
pub use effective_price::{
    CAMPAIGN_PRICE_PRECEDENCE, EffectivePriceResult, PLAN_PRICE_PRECEDENCE, PriceCandidate,
    first_positive_price, get_effective_campaign_price, get_effective_plan_price,
    ignored_overrides, price_candidates, price_precedence, resolve_effective_price,
    resolve_with_audit,
};
pub use line_item::{
    LineQuoteResult, create_line_item, quote_line_item, quote_line_item_with_audit,
    recalculate_line_item, set_line_booked_days, set_line_dates, validate_line_item,
};
pub use money::{MONEY_SCALE, checked_sum, round_money};
pub use prorata_rent::{
    RentCalculationResult, compute_rent, compute_rent_for_mode, compute_rent_with_audit,
};
