//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pricing
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BillingDefaults, EngineMetadata, PricingConfig, TaxConfig};

/// The file read from the configuration directory.
pub const CONFIG_FILE_NAME: &str = "pricing.yaml";

/// Loads and provides access to the pricing configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── pricing.yaml   # Billing defaults, tax and server settings
/// ```
///
/// # Example
///
/// ```no_run
/// use ooh_pricing_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Tax: {}%", loader.tax_percent());
/// # Ok::<(), ooh_pricing_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `pricing.yaml` is missing, is not valid YAML, or
    /// holds values the engine cannot work with (zero default day count,
    /// negative tax).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file_path = path.as_ref().join(CONFIG_FILE_NAME);
        let path_str = file_path.display().to_string();

        let content = fs::read_to_string(&file_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: PricingConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&config, &path_str)?;
        tracing::debug!(path = %path_str, name = %config.engine.name, "Loaded pricing configuration");

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PricingConfig) -> Self {
        Self { config }
    }

    fn validate(config: &PricingConfig, path: &str) -> EngineResult<()> {
        if config.billing.default_booked_days == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "billing.default_booked_days must be at least 1".to_string(),
            });
        }
        if config.tax.percent < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!("tax.percent must not be negative, got {}", config.tax.percent),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.config.engine
    }

    /// Returns the defaults for new line items.
    pub fn billing_defaults(&self) -> &BillingDefaults {
        &self.config.billing
    }

    /// Returns the tax settings.
    pub fn tax(&self) -> &TaxConfig {
        &self.config.tax
    }

    /// Returns the tax percentage applied to document subtotals.
    pub fn tax_percent(&self) -> Decimal {
        self.config.tax.percent
    }

    /// Returns the address the API should listen on.
    pub fn bind_address(&self) -> &str {
        &self.config.server.bind_address
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(PricingConfig::default())
    }
}
