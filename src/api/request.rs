//! Request types for the pricing engine API.
//!
//! Dates in the rent and date-span requests are taken as raw strings so that
//! non-canonical input is reported as `DATE_PARSE_ERROR` instead of a generic
//! JSON error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{BulkScheduleEdit, BulkSelection};
use crate::models::{BookingDocument, PriceInputs, PricingContext};

/// Request body for `POST /price/effective`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivePriceRequest {
    /// Whether the line belongs to a plan or a campaign.
    pub context: PricingContext,
    /// The card rate and whichever overrides are set.
    #[serde(default)]
    pub prices: PriceInputs,
}

/// Request body for `POST /rent/quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentQuoteRequest {
    /// The effective monthly price.
    pub monthly_rate: Decimal,
    /// First booked day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last booked day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Billing mode; the configured default when omitted.
    #[serde(default)]
    pub billing_mode: Option<String>,
}

/// Request body for `POST /dates/span`.
///
/// Exactly one of `end_date` and `booked_days` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSpanRequest {
    /// First booked day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last booked day, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Inclusive day count.
    #[serde(default)]
    pub booked_days: Option<i64>,
}

/// Request body for `POST /documents/bulk-schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkScheduleRequest {
    /// The document whose line items are edited.
    pub document: BookingDocument,
    /// Which line items to edit.
    pub selection: BulkSelection,
    /// The schedule change to apply.
    pub edit: BulkScheduleEdit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceField;

    #[test]
    fn test_deserialize_effective_price_request() {
        let json = r#"{
            "context": "campaign",
            "prices": {
                "negotiated_rate": "0",
                "final_price": "7500",
                "card_rate": "9000"
            }
        }"#;

        let request: EffectivePriceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.context, PricingContext::Campaign);
        assert_eq!(request.prices.value(PriceField::NegotiatedRate), Some(Decimal::ZERO));
        assert_eq!(request.prices.value(PriceField::SalesPrice), None);
    }

    #[test]
    fn test_deserialize_rent_quote_without_mode() {
        let json = r#"{
            "monthly_rate": "9000",
            "start_date": "2024-01-01",
            "end_date": "2024-01-10"
        }"#;

        let request: RentQuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.monthly_rate, Decimal::from(9000));
        assert!(request.billing_mode.is_none());
    }

    #[test]
    fn test_deserialize_date_span_with_days() {
        let json = r#"{"start_date": "2024-02-20", "booked_days": 15}"#;

        let request: DateSpanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.booked_days, Some(15));
        assert!(request.end_date.is_none());
    }

    #[test]
    fn test_deserialize_bulk_schedule_request() {
        let json = r#"{
            "document": {
                "id": "plan_001",
                "context": "plan",
                "start_date": "2024-01-01",
                "end_date": null,
                "items": []
            },
            "selection": {"type": "items", "item_ids": ["a", "b"]},
            "edit": {"type": "booked_days", "days": 7}
        }"#;

        let request: BulkScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.document.id, "plan_001");
        assert_eq!(request.edit, BulkScheduleEdit::BookedDays { days: 7 });
        assert!(matches!(request.selection, BulkSelection::Items { ref item_ids } if item_ids.len() == 2));
    }
}
