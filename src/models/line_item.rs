//! Bookable line item and booking document models.
//!
//! A line item holds one media asset's commercial terms inside a plan or
//! campaign. The document groups the line items and carries the default
//! booking window for newly added assets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BillingMode, PriceInputs, PricingContext};

/// One media asset's commercial terms within a booking document.
///
/// `rent_amount` and `daily_rate` are derived values; they are only ever
/// written by the calculation functions, together, from the effective
/// price, the dates and the billing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookableLineItem {
    /// Unique identifier for the line item.
    pub id: String,
    /// The media asset being booked.
    pub asset_id: String,
    /// The catalog monthly rate, copied in when the asset was added.
    pub card_rate: Decimal,
    /// Price set while editing a plan.
    #[serde(default)]
    pub negotiated_price: Option<Decimal>,
    /// Negotiated rate stored on the line item.
    #[serde(default)]
    pub negotiated_rate: Option<Decimal>,
    /// Sales price.
    #[serde(default)]
    pub sales_price: Option<Decimal>,
    /// Final campaign price.
    #[serde(default)]
    pub final_price: Option<Decimal>,
    /// First booked day (inclusive).
    pub start_date: NaiveDate,
    /// Last booked day (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive day count between `start_date` and `end_date`.
    pub booked_days: u32,
    /// The pricing rule for this booking.
    #[serde(default)]
    pub billing_mode: BillingMode,
    /// One-off printing cost, never pro-rated.
    #[serde(default)]
    pub printing_charges: Decimal,
    /// One-off mounting cost, never pro-rated.
    #[serde(default)]
    pub mounting_charges: Decimal,
    /// Derived rent for the booking window, rounded to 2 places.
    #[serde(default)]
    pub rent_amount: Decimal,
    /// Derived daily rate, rounded to 2 places.
    #[serde(default)]
    pub daily_rate: Decimal,
}

impl BookableLineItem {
    /// Collects the candidate price fields of this item.
    pub fn price_inputs(&self) -> PriceInputs {
        PriceInputs {
            negotiated_price: self.negotiated_price,
            negotiated_rate: self.negotiated_rate,
            sales_price: self.sales_price,
            final_price: self.final_price,
            card_rate: Some(self.card_rate),
        }
    }
}

/// A plan or campaign: a booking window plus its line items.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::models::{BookingDocument, PricingContext};
/// use chrono::NaiveDate;
///
/// let document = BookingDocument {
///     id: "plan_001".to_string(),
///     context: PricingContext::Plan,
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     end_date: None,
///     items: vec![],
/// };
/// assert!(document.find_item("line_1").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDocument {
    /// Unique identifier for the document.
    pub id: String,
    /// Whether this is a plan or a campaign.
    pub context: PricingContext,
    /// Default first day for newly added assets.
    pub start_date: NaiveDate,
    /// Default last day for newly added assets, if the document has one.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The booked assets.
    #[serde(default)]
    pub items: Vec<BookableLineItem>,
}

impl BookingDocument {
    /// Finds a line item by ID.
    pub fn find_item(&self, item_id: &str) -> Option<&BookableLineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Removes a line item, returning it if it was present.
    pub fn remove_item(&mut self, item_id: &str) -> Option<BookableLineItem> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_item(id: &str) -> BookableLineItem {
        BookableLineItem {
            id: id.to_string(),
            asset_id: "asset_001".to_string(),
            card_rate: dec("5000"),
            negotiated_price: Some(dec("4800")),
            negotiated_rate: None,
            sales_price: Some(dec("4200")),
            final_price: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            booked_days: 30,
            billing_mode: BillingMode::Prorata30,
            printing_charges: Decimal::ZERO,
            mounting_charges: Decimal::ZERO,
            rent_amount: Decimal::ZERO,
            daily_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn test_deserialize_minimal_line_item() {
        let json = r#"{
            "id": "line_1",
            "asset_id": "asset_001",
            "card_rate": "5000",
            "start_date": "2024-01-01",
            "end_date": "2024-01-30",
            "booked_days": 30
        }"#;

        let item: BookableLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.card_rate, dec("5000"));
        assert_eq!(item.billing_mode, BillingMode::Prorata30);
        assert_eq!(item.negotiated_price, None);
        assert_eq!(item.printing_charges, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_rejects_unknown_billing_mode() {
        let json = r#"{
            "id": "line_1",
            "asset_id": "asset_001",
            "card_rate": "5000",
            "start_date": "2024-01-01",
            "end_date": "2024-01-30",
            "booked_days": 30,
            "billing_mode": "CALENDAR_MONTH"
        }"#;

        let err = serde_json::from_str::<BookableLineItem>(json).unwrap_err();
        assert!(err.to_string().contains("CALENDAR_MONTH"));
    }

    #[test]
    fn test_price_inputs_carry_every_field() {
        let inputs = create_test_item("line_1").price_inputs();

        assert_eq!(inputs.negotiated_price, Some(dec("4800")));
        assert_eq!(inputs.sales_price, Some(dec("4200")));
        assert_eq!(inputs.card_rate, Some(dec("5000")));
        assert_eq!(inputs.final_price, None);
    }

    #[test]
    fn test_remove_item_drops_only_that_item() {
        let mut document = BookingDocument {
            id: "plan_001".to_string(),
            context: PricingContext::Plan,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()),
            items: vec![create_test_item("line_1"), create_test_item("line_2")],
        };

        let removed = document.remove_item("line_1").unwrap();
        assert_eq!(removed.id, "line_1");
        assert_eq!(document.items.len(), 1);
        assert!(document.find_item("line_2").is_some());
        assert!(document.remove_item("line_1").is_none());
    }
}
