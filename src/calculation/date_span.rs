//! Inclusive date-span arithmetic.
//!
//! Booking windows count both boundary days: a booking from day N to day N
//! is one day. This module converts between `(start, end)` and
//! `(start, days)` and owns the canonical `YYYY-MM-DD` string form used by
//! the persistence layer.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

/// The canonical calendar-date format.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Counts the days from `start` to `end`, both included.
///
/// An inverted range is a validation error; it is never clamped to one day.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::days_between_inclusive;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(days_between_inclusive(start, end).unwrap(), 10);
/// assert_eq!(days_between_inclusive(start, start).unwrap(), 1);
/// assert!(days_between_inclusive(end, start).is_err());
/// ```
pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let days = (end - start).num_days() + 1;
    u32::try_from(days).map_err(|_| EngineError::CalculationError {
        message: format!("Day count {} between {} and {} is out of range", days, start, end),
    })
}

/// Returns the last day of a booking of `days` days starting on `start`.
///
/// This is the inverse of [`days_between_inclusive`]:
/// `end_from_start_and_days(start, days_between_inclusive(start, end)?)` is
/// `end` again.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::end_from_start_and_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// assert_eq!(
///     end_from_start_and_days(start, 30).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
/// );
/// ```
pub fn end_from_start_and_days(start: NaiveDate, days: u32) -> EngineResult<NaiveDate> {
    if days == 0 {
        return Err(EngineError::InvalidBookedDays { days: 0 });
    }

    start
        .checked_add_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("A booking of {} days from {} ends out of range", days, start),
        })
}

/// Formats the calendar fields of a date as `YYYY-MM-DD`.
///
/// Only year, month and day are read, so a zoned date-time is formatted by
/// its local calendar date, never by the date of its UTC instant.
pub fn to_canonical_date_string<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a canonical `YYYY-MM-DD` string into a calendar date.
///
/// Non-padded forms such as `2024-3-5` are rejected so every accepted string
/// formats back to itself.
pub fn parse_canonical_date(input: &str) -> EngineResult<NaiveDate> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(EngineError::DateParseError {
            input: input.to_string(),
            message: "expected a YYYY-MM-DD calendar date".to_string(),
        });
    }

    NaiveDate::parse_from_str(input, CANONICAL_DATE_FORMAT).map_err(|e| {
        EngineError::DateParseError {
            input: input.to_string(),
            message: e.to_string(),
        }
    })
}

/// Anchors a calendar date at 12:00 local wall-clock time.
///
/// Noon is at least eleven hours from either midnight, so converting the
/// result between time zones cannot move it onto a neighbouring date.
pub fn anchor_at_local_noon(date: NaiveDate) -> EngineResult<NaiveDateTime> {
    date.and_hms_opt(12, 0, 0)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("Cannot anchor {} at noon", date),
        })
}

/// Reconstructs a stored date string as local noon of that calendar day.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::{from_canonical_date_string, to_canonical_date_string};
///
/// let noon = from_canonical_date_string("2024-03-15").unwrap();
/// assert_eq!(noon.to_string(), "2024-03-15 12:00:00");
/// assert_eq!(to_canonical_date_string(&noon), "2024-03-15");
/// ```
pub fn from_canonical_date_string(input: &str) -> EngineResult<NaiveDateTime> {
    anchor_at_local_noon(parse_canonical_date(input)?)
}

/// A validated inclusive booking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Creates a span, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the span of `days` days starting on `start`.
    pub fn from_start_and_days(start: NaiveDate, days: u32) -> EngineResult<Self> {
        let end = end_from_start_and_days(start, days)?;
        Ok(Self { start, end })
    }

    /// First day of the span.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the span.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive number of days in the span.
    pub fn days(&self) -> u32 {
        // chrono's date range is far below u32::MAX days
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(u32::MAX)
    }

    /// Returns true if `date` falls inside the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the days both spans cover, if any.
    pub fn overlap(&self, other: &DateSpan) -> Option<DateSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateSpan { start, end })
    }
}
