//! Pricing engine for out-of-home (OOH) advertising bookings
//!
//! This crate resolves the effective price of a booked asset from its
//! negotiated overrides, prorates monthly rent over inclusive booking
//! windows (PRORATA_30) and prices whole plans and campaigns.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
