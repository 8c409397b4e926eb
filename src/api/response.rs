//! Response types for the pricing engine API.
//!
//! This module defines the success bodies that are not domain models and
//! the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BookableLineItem, LineItemUpdate};

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is answering.
    pub status: String,
    /// The engine version.
    pub version: String,
}

/// Response body for `POST /dates/span`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSpanResponse {
    /// First booked day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last booked day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Inclusive day count.
    pub booked_days: u32,
}

/// Response body for `POST /documents/bulk-schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkScheduleResponse {
    /// How many line items changed.
    pub updated_count: usize,
    /// The new schedule and amounts per line item, in document order.
    pub updates: Vec<LineItemUpdate>,
    /// Every line item of the document after the updates were applied.
    pub items: Vec<BookableLineItem>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            EngineError::InvalidDateRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    message,
                    "The end date must be on or after the start date",
                ))
            }
            EngineError::InvalidBookedDays { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_BOOKED_DAYS", message))
            }
            EngineError::NegativeRate { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("NEGATIVE_RATE", message))
            }
            EngineError::UnsupportedBillingMode { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "UNSUPPORTED_BILLING_MODE",
                    message,
                    "The only supported billing mode is PRORATA_30",
                ))
            }
            EngineError::DateParseError { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "DATE_PARSE_ERROR",
                    message,
                    "Dates must be calendar dates in YYYY-MM-DD form",
                ))
            }
            EngineError::LineItemNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LINE_ITEM_NOT_FOUND", message),
            },
            EngineError::InvalidLineItem { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_LINE_ITEM", message))
            }
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_date_range_maps_to_400() {
        let engine_error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DATE_RANGE");
        assert!(api_error.error.message.contains("2024-01-01"));
    }

    #[test]
    fn test_unsupported_mode_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::UnsupportedBillingMode {
            mode: "CALENDAR_MONTH".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "UNSUPPORTED_BILLING_MODE");
    }

    #[test]
    fn test_missing_line_item_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::LineItemNotFound {
            item_id: "ghost".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LINE_ITEM_NOT_FOUND");
    }

    #[test]
    fn test_calculation_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "overflow".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.details.as_deref(), Some("Calculation error: overflow"));
    }
}
