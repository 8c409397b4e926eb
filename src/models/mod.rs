//! Core data models for the pricing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_mode;
mod calculation_result;
mod line_item;
mod pricing;

pub use billing_mode::BillingMode;
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BookingConflict, DocumentTotals, LineItemQuote,
    LineItemUpdate, PricingResult, RentQuote, ResolvedPrice,
};
pub use line_item::{BookableLineItem, BookingDocument};
pub use pricing::{PriceField, PriceInputs, PricingContext};
