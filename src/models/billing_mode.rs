//! Billing mode model.
//!
//! A billing mode decides how a monthly rate is turned into a billable
//! amount for a concrete booking window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The pricing rule applied to a booking window.
///
/// Only `PRORATA_30` has defined semantics. The enum is closed: any other
/// mode string is rejected with [`EngineError::UnsupportedBillingMode`]
/// instead of falling back to the pro-rata rule.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::models::BillingMode;
///
/// let mode: BillingMode = "PRORATA_30".parse().unwrap();
/// assert_eq!(mode, BillingMode::Prorata30);
/// assert_eq!(mode.base_days(), 30);
/// assert!("CALENDAR_MONTH".parse::<BillingMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BillingMode {
    /// Monthly rate spread over a fixed 30-day month, billed per inclusive day.
    #[default]
    Prorata30,
}

impl BillingMode {
    /// The wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::Prorata30 => "PRORATA_30",
        }
    }

    /// The number of days a monthly rate is spread over.
    pub fn base_days(&self) -> u32 {
        match self {
            BillingMode::Prorata30 => 30,
        }
    }
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRORATA_30" => Ok(BillingMode::Prorata30),
            other => Err(EngineError::UnsupportedBillingMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for BillingMode {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BillingMode> for String {
    fn from(mode: BillingMode) -> Self {
        mode.as_str().to_string()
    }
}
