//! Document totals.
//!
//! Totals are summed at full precision from the unrounded per-line values
//! and rounded once at the end. Adding up the rounded per-line amounts
//! instead drifts by a cent per few lines, so both figures are reported.

use rust_decimal::Decimal;

use super::money::{checked_sum, round_money};
use crate::error::{EngineError, EngineResult};
use crate::models::{DocumentTotals, LineItemQuote, RentQuote};

/// Rent summed two ways over a set of quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentAggregate {
    /// `Σ raw rent`, unrounded.
    pub raw_total: Decimal,
    /// `round(Σ raw rent)`, the figure to display as the total.
    pub rent_total: Decimal,
    /// `Σ round(raw rent)`, the sum of the displayed lines.
    pub rounded_lines_total: Decimal,
    /// `rent_total - rounded_lines_total`.
    pub rounding_difference: Decimal,
}

/// Aggregates rent over many quotes, rounding once.
///
/// # Errors
///
/// - [`EngineError::CalculationError`] if either sum overflows
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::{aggregate_rent, compute_rent};
/// use ooh_pricing_engine::models::BillingMode;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let quote = compute_rent(Decimal::from(1000), day, day, BillingMode::Prorata30)?;
/// let quotes = vec![quote.clone(), quote.clone(), quote];
///
/// let aggregate = aggregate_rent(&quotes)?;
/// assert_eq!(aggregate.rent_total, Decimal::from(100));
/// assert_eq!(aggregate.rounded_lines_total, Decimal::from_str("99.99").unwrap());
/// # Ok::<(), ooh_pricing_engine::error::EngineError>(())
/// ```
pub fn aggregate_rent<'a, I>(quotes: I) -> EngineResult<RentAggregate>
where
    I: IntoIterator<Item = &'a RentQuote>,
{
    let (raw_total, rounded_lines_total) = quotes
        .into_iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(raw, rounded), quote| {
            Some((
                raw.checked_add(quote.raw_rent_amount)?,
                rounded.checked_add(quote.rent_amount)?,
            ))
        })
        .ok_or_else(|| EngineError::CalculationError {
            message: "Overflow summing rent".to_string(),
        })?;
    let rent_total = round_money(raw_total);

    Ok(RentAggregate {
        raw_total,
        rent_total,
        rounded_lines_total,
        rounding_difference: rent_total - rounded_lines_total,
    })
}

/// Calculates the totals of a priced document.
///
/// Printing and mounting charges are added as-is. Tax is computed on the
/// unrounded subtotal.
///
/// # Errors
///
/// - [`EngineError::NegativeRate`] if `tax_percent` is negative
/// - [`EngineError::CalculationError`] on decimal overflow
pub fn calculate_document_totals(
    lines: &[LineItemQuote],
    tax_percent: Decimal,
) -> EngineResult<DocumentTotals> {
    if tax_percent < Decimal::ZERO {
        return Err(EngineError::NegativeRate {
            field: "tax_percent".to_string(),
            value: tax_percent,
        });
    }

    let rent = aggregate_rent(lines.iter().map(|line| &line.rent))?;
    let printing_total =
        checked_sum(lines.iter().map(|line| line.printing_charges), "printing charges")?;
    let mounting_total =
        checked_sum(lines.iter().map(|line| line.mounting_charges), "mounting charges")?;
    let total_booked_days: u64 = lines.iter().map(|line| u64::from(line.rent.days)).sum();

    let raw_subtotal = checked_sum([rent.raw_total, printing_total, mounting_total], "subtotal")?;
    let raw_tax = raw_subtotal
        .checked_mul(tax_percent)
        .and_then(|taxed| taxed.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("Overflow applying {}% tax to {}", tax_percent, raw_subtotal),
        })?;

    let raw_grand_total = checked_sum([raw_subtotal, raw_tax], "grand total")?;

    Ok(DocumentTotals {
        line_count: lines.len(),
        total_booked_days,
        rent_total: rent.rent_total,
        rounded_lines_total: rent.rounded_lines_total,
        rounding_difference: rent.rounding_difference,
        printing_total: round_money(printing_total),
        mounting_total: round_money(mounting_total),
        subtotal: round_money(raw_subtotal),
        tax_percent,
        tax_amount: round_money(raw_tax),
        grand_total: round_money(raw_grand_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_rent;
    use crate::models::BillingMode;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_line(id: &str, monthly: &str, days: u32, printing: &str) -> LineItemQuote {
        let start = date(2024, 1, 1);
        let end = start + chrono::Days::new(u64::from(days - 1));
        let rent = compute_rent(dec(monthly), start, end, BillingMode::Prorata30).unwrap();
        LineItemQuote {
            item_id: id.to_string(),
            asset_id: format!("asset_{}", id),
            effective_price: dec(monthly),
            price_source: None,
            printing_charges: dec(printing),
            mounting_charges: Decimal::ZERO,
            line_total: round_money(rent.raw_rent_amount + dec(printing)),
            rent,
        }
    }

    #[test]
    fn test_total_is_rounded_once_from_raw_sum() {
        let lines = vec![
            create_line("a", "1000", 1, "0"),
            create_line("b", "1000", 1, "0"),
            create_line("c", "1000", 1, "0"),
        ];

        let totals = calculate_document_totals(&lines, Decimal::ZERO).unwrap();

        assert_eq!(totals.rent_total, dec("100.00"));
        assert_eq!(totals.rounded_lines_total, dec("99.99"));
        assert_eq!(totals.rounding_difference, dec("0.01"));
        assert_eq!(totals.grand_total, totals.rent_total);
    }

    #[test]
    fn test_exact_lines_have_no_rounding_difference() {
        let lines = vec![create_line("a", "9000", 10, "0"), create_line("b", "3000", 30, "0")];

        let totals = calculate_document_totals(&lines, Decimal::ZERO).unwrap();

        assert_eq!(totals.rent_total, dec("6000"));
        assert_eq!(totals.rounding_difference, Decimal::ZERO);
        assert_eq!(totals.total_booked_days, 40);
    }

    #[test]
    fn test_charges_and_tax_on_top_of_rent() {
        let lines = vec![create_line("a", "9000", 10, "500"), create_line("b", "3000", 30, "0")];

        let totals = calculate_document_totals(&lines, dec("18")).unwrap();

        assert_eq!(totals.printing_total, dec("500"));
        assert_eq!(totals.subtotal, dec("6500"));
        assert_eq!(totals.tax_amount, dec("1170"));
        assert_eq!(totals.grand_total, dec("7670"));
    }

    #[test]
    fn test_empty_document_totals_are_zero() {
        let totals = calculate_document_totals(&[], dec("18")).unwrap();

        assert_eq!(totals.line_count, 0);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_charges_overflow_is_a_calculation_error() {
        let lines = vec![
            create_line("a", "0", 1, "50000000000000000000000000000"),
            create_line("b", "0", 1, "50000000000000000000000000000"),
        ];

        match calculate_document_totals(&lines, Decimal::ZERO) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("printing charges"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_rent_overflow_is_a_calculation_error() {
        let mut quote = create_line("a", "1000", 1, "0").rent;
        quote.raw_rent_amount = Decimal::MAX;
        quote.rent_amount = Decimal::MAX;

        let result = aggregate_rent(&[quote.clone(), quote]);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_negative_tax_is_rejected() {
        let result = calculate_document_totals(&[], dec("-1"));
        assert!(matches!(result, Err(EngineError::NegativeRate { .. })));
    }
}
