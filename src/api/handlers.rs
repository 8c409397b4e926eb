//! HTTP request handlers for the pricing engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DateSpan, apply_updates, compute_rent, compute_rent_for_mode, parse_canonical_date,
    plan_bulk_schedule, price_document, resolve_effective_price, to_canonical_date_string,
};
use crate::config::BillingDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{BookingDocument, RentQuote};

use super::request::{
    BulkScheduleRequest, DateSpanRequest, EffectivePriceRequest, RentQuoteRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BulkScheduleResponse, DateSpanResponse, HealthResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/price/effective", post(effective_price_handler))
        .route("/rent/quote", post(rent_quote_handler))
        .route("/dates/span", post(date_span_handler))
        .route("/documents/price", post(price_document_handler))
        .route("/documents/bulk-schedule", post(bulk_schedule_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    error_response(err.into())
}

/// Unwraps a JSON body, turning extractor rejections into error responses.
fn read_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message carries the field path and reason
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else if body_text.contains("Unsupported billing mode") {
                ApiError::new("UNSUPPORTED_BILLING_MODE", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(error_response(ApiErrorResponse::bad_request(error)))
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /price/effective.
///
/// Resolves the monthly price a line item is billed at.
async fn effective_price_handler(
    payload: Result<Json<EffectivePriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match read_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let resolved = resolve_effective_price(&request.prices, request.context);
    info!(
        correlation_id = %correlation_id,
        context = %request.context,
        price = %resolved.price,
        "Resolved effective price"
    );
    json_response(StatusCode::OK, resolved)
}

fn quote_rent(request: &RentQuoteRequest, defaults: &BillingDefaults) -> EngineResult<RentQuote> {
    let start = parse_canonical_date(&request.start_date)?;
    let end = parse_canonical_date(&request.end_date)?;

    match request.billing_mode.as_deref() {
        Some(mode) => compute_rent_for_mode(request.monthly_rate, start, end, mode),
        None => compute_rent(request.monthly_rate, start, end, defaults.default_mode),
    }
}

/// Handler for POST /rent/quote.
///
/// Prorates a monthly rate over an inclusive booking window.
async fn rent_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<RentQuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match read_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match quote_rent(&request, state.config().billing_defaults()) {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                days = quote.days,
                rent_amount = %quote.rent_amount,
                "Rent quoted"
            );
            json_response(StatusCode::OK, quote)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn resolve_span(request: &DateSpanRequest) -> Result<DateSpanResponse, ApiErrorResponse> {
    let start = parse_canonical_date(&request.start_date)?;

    let span = match (request.end_date.as_deref(), request.booked_days) {
        (Some(end), None) => DateSpan::new(start, parse_canonical_date(end)?)?,
        (None, Some(days)) => {
            if days < 1 {
                return Err(EngineError::InvalidBookedDays { days }.into());
            }
            let days = u32::try_from(days).map_err(|_| EngineError::CalculationError {
                message: format!("{} days from {} is past the end of the calendar", days, start),
            })?;
            DateSpan::from_start_and_days(start, days)?
        }
        _ => {
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "Exactly one of end_date and booked_days is required",
            )));
        }
    };

    Ok(DateSpanResponse {
        start_date: to_canonical_date_string(&span.start()),
        end_date: to_canonical_date_string(&span.end()),
        booked_days: span.days(),
    })
}

/// Handler for POST /dates/span.
///
/// Derives the end date from a day count or the day count from an end date.
async fn date_span_handler(payload: Result<Json<DateSpanRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match read_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match resolve_span(&request) {
        Ok(span) => json_response(StatusCode::OK, span),
        Err(api_error) => {
            warn!(
                correlation_id = %correlation_id,
                code = %api_error.error.code,
                "Date span rejected"
            );
            error_response(api_error)
        }
    }
}

/// Handler for POST /documents/price.
///
/// Prices every line item of a plan or campaign and totals the document.
async fn price_document_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingDocument>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let document = match read_payload(payload, correlation_id) {
        Ok(document) => document,
        Err(response) => return response,
    };

    match price_document(&document, state.config().tax_percent()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                document_id = %result.document_id,
                lines = result.lines.len(),
                conflicts = result.conflicts.len(),
                grand_total = %result.totals.grand_total,
                duration_us = result.audit_trace.duration_us,
                "Document priced"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /documents/bulk-schedule.
///
/// Applies one schedule change to the selected line items, all or nothing,
/// and returns the document's line items with the changes written back.
async fn bulk_schedule_handler(
    payload: Result<Json<BulkScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match read_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut items = request.document.items;
    let updates = match plan_bulk_schedule(
        &items,
        &request.selection,
        &request.edit,
        request.document.context,
    ) {
        Ok(updates) => updates,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let updated_count = apply_updates(&mut items, &updates);
    info!(
        correlation_id = %correlation_id,
        document_id = %request.document.id,
        updated_count,
        "Bulk schedule applied"
    );
    json_response(
        StatusCode::OK,
        BulkScheduleResponse {
            updated_count,
            updates,
            items,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, PricingConfig};
    use crate::models::ResolvedPrice;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        create_router(AppState::new(ConfigLoader::from_config(PricingConfig::default())))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health_returns_version() {
        let response = create_test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_effective_price_skips_zero_override() {
        let (status, body) = post_json(
            "/price/effective",
            r#"{"context": "plan", "prices": {"negotiated_price": "0", "sales_price": "4200", "card_rate": "5000"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let resolved: ResolvedPrice = serde_json::from_slice(&body).unwrap();
        assert_eq!(resolved.price, Decimal::from(4200));
    }

    #[tokio::test]
    async fn test_rent_quote_uses_default_mode() {
        let (status, body) = post_json(
            "/rent/quote",
            r#"{"monthly_rate": "5000", "start_date": "2024-03-01", "end_date": "2024-03-07"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let quote: RentQuote = serde_json::from_slice(&body).unwrap();
        assert_eq!(quote.days, 7);
        assert_eq!(quote.daily_rate, Decimal::from_str("166.67").unwrap());
        assert_eq!(quote.rent_amount, Decimal::from_str("1166.67").unwrap());
    }

    #[tokio::test]
    async fn test_rent_quote_rejects_unknown_mode() {
        let (status, body) = post_json(
            "/rent/quote",
            r#"{"monthly_rate": "5000", "start_date": "2024-03-01", "end_date": "2024-03-07", "billing_mode": "CALENDAR_MONTH"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "UNSUPPORTED_BILLING_MODE");
    }

    #[tokio::test]
    async fn test_rent_quote_rejects_inverted_range() {
        let (status, body) = post_json(
            "/rent/quote",
            r#"{"monthly_rate": "5000", "start_date": "2024-03-07", "end_date": "2024-03-01"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_date_span_from_booked_days() {
        let (status, body) =
            post_json("/dates/span", r#"{"start_date": "2024-02-20", "booked_days": 15}"#).await;

        assert_eq!(status, StatusCode::OK);
        let span: DateSpanResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(span.end_date, "2024-03-05");
        assert_eq!(span.booked_days, 15);
    }

    #[tokio::test]
    async fn test_date_span_requires_exactly_one_bound() {
        let (status, body) = post_json(
            "/dates/span",
            r#"{"start_date": "2024-02-20", "end_date": "2024-02-21", "booked_days": 2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_date_span_rejects_zero_days() {
        let (status, body) =
            post_json("/dates/span", r#"{"start_date": "2024-02-20", "booked_days": 0}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_BOOKED_DAYS");
    }

    #[tokio::test]
    async fn test_date_span_rejects_non_canonical_date() {
        let (status, body) =
            post_json("/dates/span", r#"{"start_date": "2024-2-20", "booked_days": 3}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "DATE_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_json("/documents/price", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let (status, body) = post_json("/rent/quote", r#"{"monthly_rate": "5000"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_bulk_schedule_unknown_item_returns_404() {
        let (status, body) = post_json(
            "/documents/bulk-schedule",
            r#"{
                "document": {"id": "plan_001", "context": "plan", "start_date": "2024-01-01", "items": []},
                "selection": {"type": "items", "item_ids": ["ghost"]},
                "edit": {"type": "booked_days", "days": 7}
            }"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "LINE_ITEM_NOT_FOUND");
    }
}
