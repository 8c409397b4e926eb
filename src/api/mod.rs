//! HTTP API module for the pricing engine.
//!
//! This module exposes effective price resolution, rent quotes, date-span
//! arithmetic and document pricing as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BulkScheduleRequest, DateSpanRequest, EffectivePriceRequest, RentQuoteRequest};
pub use response::{
    ApiError, ApiErrorResponse, BulkScheduleResponse, DateSpanResponse, HealthResponse,
};
pub use state::AppState;
