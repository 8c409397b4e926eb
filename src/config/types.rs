//! Configuration types for the pricing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `pricing.yaml`.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::BillingMode;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// A human-readable name for this deployment.
    pub name: String,
    /// The version of the pricing rules in force.
    pub version: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "OOH Pricing Engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Defaults applied to newly booked line items.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingDefaults {
    /// Billing mode for new line items.
    #[serde(default)]
    pub default_mode: BillingMode,
    /// Day count used when the document has no end date.
    #[serde(default = "default_booked_days")]
    pub default_booked_days: u32,
}

fn default_booked_days() -> u32 {
    30
}

impl Default for BillingDefaults {
    fn default() -> Self {
        Self {
            default_mode: BillingMode::Prorata30,
            default_booked_days: default_booked_days(),
        }
    }
}

/// Tax applied on top of document subtotals.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Label shown on documents (e.g., "GST").
    pub label: String,
    /// Percentage of the subtotal (e.g., 18 for 18%).
    pub percent: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            label: "GST".to_string(),
            percent: Decimal::ZERO,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The complete configuration loaded from `pricing.yaml`.
///
/// Every section is optional in the file and falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// Engine metadata.
    #[serde(default)]
    pub engine: EngineMetadata,
    /// Line item defaults.
    #[serde(default)]
    pub billing: BillingDefaults,
    /// Tax settings.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
}
