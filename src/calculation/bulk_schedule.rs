//! Bulk schedule edits.
//!
//! Applies one date range, day count or start date across a selection of
//! line items. The whole batch is planned in memory first: if any selected
//! item cannot be rescheduled, no update is produced at all. Committing the
//! returned updates is left to the caller.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::date_span::{DateSpan, days_between_inclusive};
use super::line_item::quote_line_item;
use crate::error::{EngineError, EngineResult};
use crate::models::{BookableLineItem, LineItemUpdate, PricingContext};

/// Which line items a bulk edit applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BulkSelection {
    /// Every line item in the document.
    All,
    /// Only the listed line items.
    Items {
        /// IDs of the selected items.
        item_ids: Vec<String>,
    },
}

/// The schedule change applied to every selected line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BulkScheduleEdit {
    /// Give every item the same booking window.
    DateRange {
        /// New first day.
        start_date: NaiveDate,
        /// New last day.
        end_date: NaiveDate,
    },
    /// Keep each item's start and set its day count.
    BookedDays {
        /// New inclusive day count.
        days: u32,
    },
    /// Keep each item's day count and move it to a new start.
    StartDate {
        /// New first day.
        start_date: NaiveDate,
    },
}

impl BulkScheduleEdit {
    fn validate(&self) -> EngineResult<()> {
        match self {
            BulkScheduleEdit::DateRange {
                start_date,
                end_date,
            } => DateSpan::new(*start_date, *end_date).map(|_| ()),
            BulkScheduleEdit::BookedDays { days: 0 } => {
                Err(EngineError::InvalidBookedDays { days: 0 })
            }
            BulkScheduleEdit::BookedDays { .. } | BulkScheduleEdit::StartDate { .. } => Ok(()),
        }
    }

    fn span_for(&self, item: &BookableLineItem) -> EngineResult<DateSpan> {
        match self {
            BulkScheduleEdit::DateRange {
                start_date,
                end_date,
            } => DateSpan::new(*start_date, *end_date),
            BulkScheduleEdit::BookedDays { days } => {
                DateSpan::from_start_and_days(item.start_date, *days)
            }
            BulkScheduleEdit::StartDate { start_date } => {
                let days = days_between_inclusive(item.start_date, item.end_date).map_err(|e| {
                    EngineError::InvalidLineItem {
                        item_id: item.id.clone(),
                        message: e.to_string(),
                    }
                })?;
                DateSpan::from_start_and_days(*start_date, days)
            }
        }
    }
}

fn select<'a>(
    items: &'a [BookableLineItem],
    selection: &BulkSelection,
) -> EngineResult<Vec<&'a BookableLineItem>> {
    match selection {
        BulkSelection::All => Ok(items.iter().collect()),
        BulkSelection::Items { item_ids } => {
            let mut seen = HashSet::new();
            item_ids
                .iter()
                .filter(|id| seen.insert(id.as_str()))
                .map(|id| {
                    items
                        .iter()
                        .find(|item| &item.id == id)
                        .ok_or_else(|| EngineError::LineItemNotFound {
                            item_id: id.clone(),
                        })
                })
                .collect()
        }
    }
}

/// Plans a bulk schedule edit, returning one update per selected item.
///
/// The input items are never modified.
///
/// # Errors
///
/// - the edit itself is invalid (inverted range, zero days)
/// - a selected ID is not in `items` ([`EngineError::LineItemNotFound`])
/// - any selected item cannot be rescheduled or repriced
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::{BulkScheduleEdit, BulkSelection, plan_bulk_schedule};
/// use ooh_pricing_engine::models::PricingContext;
///
/// let updates = plan_bulk_schedule(
///     &[],
///     &BulkSelection::All,
///     &BulkScheduleEdit::BookedDays { days: 15 },
///     PricingContext::Plan,
/// )?;
/// assert!(updates.is_empty());
/// # Ok::<(), ooh_pricing_engine::error::EngineError>(())
/// ```
pub fn plan_bulk_schedule(
    items: &[BookableLineItem],
    selection: &BulkSelection,
    edit: &BulkScheduleEdit,
    context: PricingContext,
) -> EngineResult<Vec<LineItemUpdate>> {
    edit.validate()?;
    let selected = select(items, selection)?;

    let updates = selected
        .into_iter()
        .map(|item| {
            let span = edit.span_for(item)?;

            let mut rescheduled = item.clone();
            rescheduled.start_date = span.start();
            rescheduled.end_date = span.end();
            rescheduled.booked_days = span.days();

            let quote = quote_line_item(&rescheduled, context)?;

            Ok(LineItemUpdate {
                item_id: item.id.clone(),
                start_date: span.start(),
                end_date: span.end(),
                booked_days: quote.rent.days,
                effective_price: quote.effective_price,
                daily_rate: quote.rent.daily_rate,
                rent_amount: quote.rent.rent_amount,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    debug!(
        selected = updates.len(),
        total = items.len(),
        context = %context,
        "Planned bulk schedule edit"
    );

    Ok(updates)
}

/// Commits planned updates to a list of line items.
///
/// Returns the number of items that were updated.
pub fn apply_updates(items: &mut [BookableLineItem], updates: &[LineItemUpdate]) -> usize {
    updates
        .iter()
        .filter(|update| {
            items
                .iter_mut()
                .find(|item| item.id == update.item_id)
                .map(|item| update.apply_to(item))
                .is_some()
        })
        .count()
}
