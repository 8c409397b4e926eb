//! Price field models.
//!
//! A line item may carry several overlapping price fields. These types name
//! them and the document context that decides which one is authoritative.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of booking document a line item belongs to.
///
/// Plans and campaigns read different price fields, in a different order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingContext {
    /// A media plan (proposal) being negotiated with a client.
    Plan,
    /// A confirmed campaign.
    Campaign,
}

impl fmt::Display for PricingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingContext::Plan => write!(f, "plan"),
            PricingContext::Campaign => write!(f, "campaign"),
        }
    }
}

/// One of the monthly price fields a line item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Price typed in by a user while editing a plan.
    NegotiatedPrice,
    /// Negotiated rate stored on the line item.
    NegotiatedRate,
    /// Sales price carried over from the asset.
    SalesPrice,
    /// Final price agreed for a campaign.
    FinalPrice,
    /// The catalog monthly rate.
    CardRate,
}

impl PriceField {
    /// The field name as stored by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::NegotiatedPrice => "negotiated_price",
            PriceField::NegotiatedRate => "negotiated_rate",
            PriceField::SalesPrice => "sales_price",
            PriceField::FinalPrice => "final_price",
            PriceField::CardRate => "card_rate",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The candidate price fields of a line item, any of which may be absent.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::models::{PriceField, PriceInputs};
/// use rust_decimal::Decimal;
///
/// let inputs = PriceInputs {
///     card_rate: Some(Decimal::from(5000)),
///     ..Default::default()
/// };
/// assert_eq!(inputs.value(PriceField::CardRate), Some(Decimal::from(5000)));
/// assert_eq!(inputs.value(PriceField::SalesPrice), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInputs {
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
    /// Catalog monthly rate.
    #[serde(default)]
    pub card_rate: Option<Decimal>,
}

impl PriceInputs {
    /// Returns the value stored for a field, if any.
    pub fn value(&self, field: PriceField) -> Option<Decimal> {
        match field {
            PriceField::NegotiatedPrice => self.negotiated_price,
            PriceField::NegotiatedRate => self.negotiated_rate,
            PriceField::SalesPrice => self.sales_price,
            PriceField::FinalPrice => self.final_price,
            PriceField::CardRate => self.card_rate,
        }
    }
}
