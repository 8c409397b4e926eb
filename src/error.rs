//! Error types for the pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the calculations can reject. All of them are local,
//! recoverable-by-caller conditions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the pricing engine.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedBillingMode {
///     mode: "CALENDAR_MONTH".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported billing mode: CALENDAR_MONTH");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The end of a booking window precedes its start.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The start of the window.
        start: NaiveDate,
        /// The end of the window.
        end: NaiveDate,
    },

    /// A day count below the one-day minimum.
    #[error("Invalid booked days {days}: a booking covers at least 1 day")]
    InvalidBookedDays {
        /// The rejected day count.
        days: i64,
    },

    /// A rate or charge that must not be negative was negative.
    #[error("Negative value for '{field}': {value}")]
    NegativeRate {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A billing mode the engine has no pricing rule for.
    #[error("Unsupported billing mode: {mode}")]
    UnsupportedBillingMode {
        /// The mode as it was supplied.
        mode: String,
    },

    /// A date string that is not a canonical `YYYY-MM-DD` calendar date.
    #[error("Failed to parse date '{input}': {message}")]
    DateParseError {
        /// The string that failed to parse.
        input: String,
        /// A description of the failure.
        message: String,
    },

    /// A bulk operation referenced a line item that is not in the document.
    #[error("Line item not found: {item_id}")]
    LineItemNotFound {
        /// The missing item ID.
        item_id: String,
    },

    /// A line item holds inconsistent data.
    #[error("Invalid line item '{item_id}': {message}")]
    InvalidLineItem {
        /// The ID of the invalid line item.
        item_id: String,
        /// A description of what made the line item invalid.
        message: String,
    },

    /// A general calculation error occurred (decimal or calendar overflow).
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/pricing.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/pricing.yaml"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_both_dates() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: end date 2024-01-01 is before start date 2024-01-10"
        );
    }

    #[test]
    fn test_invalid_booked_days_displays_count() {
        let error = EngineError::InvalidBookedDays { days: 0 };
        assert_eq!(
            error.to_string(),
            "Invalid booked days 0: a booking covers at least 1 day"
        );
    }

    #[test]
    fn test_negative_rate_displays_field_and_value() {
        let error = EngineError::NegativeRate {
            field: "monthly_rate".to_string(),
            value: Decimal::from_str("-100").unwrap(),
        };
        assert_eq!(error.to_string(), "Negative value for 'monthly_rate': -100");
    }

    #[test]
    fn test_date_parse_error_names_input() {
        let error = EngineError::DateParseError {
            input: "2024-13-01".to_string(),
            message: "input is out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse date '2024-13-01': input is out of range"
        );
    }

    #[test]
    fn test_line_item_errors_display_id() {
        let missing = EngineError::LineItemNotFound {
            item_id: "line_9".to_string(),
        };
        assert_eq!(missing.to_string(), "Line item not found: line_9");

        let invalid = EngineError::InvalidLineItem {
            item_id: "line_1".to_string(),
            message: "booked_days does not match the date span".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid line item 'line_1': booked_days does not match the date span"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unsupported_mode() -> EngineResult<()> {
            Err(EngineError::UnsupportedBillingMode {
                mode: "WEEKLY".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unsupported_mode()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
