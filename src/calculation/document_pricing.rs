//! Whole-document pricing.
//!
//! Prices every line item of a plan or campaign, aggregates the totals and
//! flags overlapping bookings, recording each decision in the audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::booking_conflict::detect_booking_conflicts;
use super::document_totals::calculate_document_totals;
use super::line_item::quote_line_item_with_audit;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, BookingDocument, PricingResult};

/// Prices a booking document.
///
/// Fails on the first invalid line item; a document is priced whole or
/// not at all.
pub fn price_document(
    document: &BookingDocument,
    tax_percent: Decimal,
) -> EngineResult<PricingResult> {
    let start_time = Instant::now();
    let mut lines = Vec::with_capacity(document.items.len());
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    for item in &document.items {
        let result = quote_line_item_with_audit(item, document.context, step_number)?;
        step_number += result.audit_steps.len() as u32;
        steps.extend(result.audit_steps);
        warnings.extend(result.warnings);
        lines.push(result.quote);
    }

    let totals = calculate_document_totals(&lines, tax_percent)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "document_totals".to_string(),
        rule_name: "Document Totals".to_string(),
        item_id: None,
        input: serde_json::json!({
            "line_count": totals.line_count,
            "tax_percent": tax_percent.to_string(),
        }),
        output: serde_json::json!({
            "rent_total": totals.rent_total.to_string(),
            "rounded_lines_total": totals.rounded_lines_total.to_string(),
            "grand_total": totals.grand_total.to_string(),
        }),
        reasoning: format!(
            "Rent summed at full precision and rounded once to ${} (per-line sum ${})",
            totals.rent_total, totals.rounded_lines_total
        ),
    });

    let conflicts = detect_booking_conflicts(&document.items);
    for conflict in &conflicts {
        warnings.push(AuditWarning {
            code: "BOOKING_OVERLAP".to_string(),
            message: format!(
                "Asset '{}' is booked by '{}' and '{}' from {} to {} ({} days)",
                conflict.asset_id,
                conflict.first_item_id,
                conflict.second_item_id,
                conflict.overlap_start,
                conflict.overlap_end,
                conflict.overlap_days
            ),
            severity: "high".to_string(),
        });
    }

    debug!(
        document_id = %document.id,
        lines = lines.len(),
        grand_total = %totals.grand_total,
        "Priced document"
    );

    Ok(PricingResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        document_id: document.id.clone(),
        context: document.context,
        lines,
        totals,
        conflicts,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{BillingMode, BookableLineItem, PricingContext};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_item(id: &str, asset_id: &str, card_rate: &str, end_day: u32) -> BookableLineItem {
        BookableLineItem {
            id: id.to_string(),
            asset_id: asset_id.to_string(),
            card_rate: dec(card_rate),
            negotiated_price: None,
            negotiated_rate: None,
            sales_price: None,
            final_price: None,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, end_day),
            booked_days: end_day,
            billing_mode: BillingMode::Prorata30,
            printing_charges: Decimal::ZERO,
            mounting_charges: Decimal::ZERO,
            rent_amount: Decimal::ZERO,
            daily_rate: Decimal::ZERO,
        }
    }

    fn create_document(items: Vec<BookableLineItem>) -> BookingDocument {
        BookingDocument {
            id: "plan_001".to_string(),
            context: PricingContext::Plan,
            start_date: date(2024, 1, 1),
            end_date: Some(date(2024, 1, 30)),
            items,
        }
    }

    #[test]
    fn test_prices_every_line_in_order() {
        let document = create_document(vec![
            create_item("a", "asset_1", "9000", 10),
            create_item("b", "asset_2", "3000", 30),
        ]);

        let result = price_document(&document, Decimal::ZERO).unwrap();

        assert_eq!(result.document_id, "plan_001");
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].rent.rent_amount, dec("3000"));
        assert_eq!(result.lines[1].rent.rent_amount, dec("3000"));
        assert_eq!(result.totals.grand_total, dec("6000"));
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_audit_steps_are_numbered_sequentially() {
        let document = create_document(vec![
            create_item("a", "asset_1", "9000", 10),
            create_item("b", "asset_2", "3000", 30),
        ]);

        let result = price_document(&document, Decimal::ZERO).unwrap();
        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.audit_trace.steps[4].rule_id, "document_totals");
    }

    #[test]
    fn test_overlap_is_reported_as_warning() {
        let document = create_document(vec![
            create_item("a", "asset_1", "9000", 10),
            create_item("b", "asset_1", "9000", 5),
        ]);

        let result = price_document(&document, Decimal::ZERO).unwrap();

        assert_eq!(result.conflicts.len(), 1);
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "BOOKING_OVERLAP" && w.severity == "high")
        );
    }

    #[test]
    fn test_invalid_line_fails_whole_document() {
        let mut bad = create_item("b", "asset_2", "3000", 30);
        bad.booked_days = 12;
        let document = create_document(vec![create_item("a", "asset_1", "9000", 10), bad]);

        match price_document(&document, Decimal::ZERO) {
            Err(EngineError::InvalidLineItem { item_id, .. }) => assert_eq!(item_id, "b"),
            other => panic!("Expected InvalidLineItem, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_charges_fail_with_calculation_error() {
        let mut first = create_item("a", "asset_1", "0", 1);
        first.printing_charges = dec("50000000000000000000000000000");
        let mut second = create_item("b", "asset_2", "0", 1);
        second.printing_charges = dec("50000000000000000000000000000");

        match price_document(&create_document(vec![first, second]), Decimal::ZERO) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("printing charges"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_prices_to_zero() {
        let result = price_document(&create_document(vec![]), dec("18")).unwrap();

        assert!(result.lines.is_empty());
        assert_eq!(result.totals.grand_total, Decimal::ZERO);
        assert_eq!(result.audit_trace.steps.len(), 1);
    }
}
