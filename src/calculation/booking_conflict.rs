//! Booking overlap detection.
//!
//! Flags line items that book the same asset over overlapping windows.
//! This is advisory only; holds and hard conflict checks belong to the
//! data store.

use std::collections::HashMap;

use tracing::warn;

use super::date_span::DateSpan;
use crate::models::{BookableLineItem, BookingConflict};

/// Finds every pair of line items booking the same asset on the same day.
///
/// Items with an inverted window are skipped; validation reports them.
/// Pairs are returned grouped by asset (first appearance) and in document
/// order within an asset.
pub fn detect_booking_conflicts(items: &[BookableLineItem]) -> Vec<BookingConflict> {
    let mut by_asset: HashMap<&str, Vec<(&BookableLineItem, DateSpan)>> = HashMap::new();
    let mut asset_order: Vec<&str> = Vec::new();

    for item in items {
        let Ok(span) = DateSpan::new(item.start_date, item.end_date) else {
            continue;
        };
        let bookings = by_asset.entry(item.asset_id.as_str()).or_default();
        if bookings.is_empty() {
            asset_order.push(item.asset_id.as_str());
        }
        bookings.push((item, span));
    }

    let mut conflicts = Vec::new();
    for asset_id in asset_order {
        let bookings = &by_asset[asset_id];
        for (i, (first, first_span)) in bookings.iter().enumerate() {
            for (second, second_span) in &bookings[i + 1..] {
                if let Some(overlap) = first_span.overlap(second_span) {
                    conflicts.push(BookingConflict {
                        asset_id: asset_id.to_string(),
                        first_item_id: first.id.clone(),
                        second_item_id: second.id.clone(),
                        overlap_start: overlap.start(),
                        overlap_end: overlap.end(),
                        overlap_days: overlap.days(),
                    });
                }
            }
        }
    }

    if !conflicts.is_empty() {
        warn!(conflicts = conflicts.len(), "Overlapping bookings detected");
    }

    conflicts
}
