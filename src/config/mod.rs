//! Configuration loading and management for the pricing engine.
//!
//! This module loads billing defaults, tax and server settings from
//! `pricing.yaml`.
//!
//! # Example
//!
//! ```no_run
//! use ooh_pricing_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default booking: {} days", config.billing_defaults().default_booked_days);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{BillingDefaults, EngineMetadata, PricingConfig, ServerConfig, TaxConfig};
