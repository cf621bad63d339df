//! Shared time utilities for wallet records.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// `chrono` pattern used for month keys such as `2024-03`.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

const NAIVE_DATE_TIME_PATTERNS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 values with an offset, naive date-times (read as UTC) and
/// bare `YYYY-MM-DD` dates, which resolve to midnight UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for pattern in NAIVE_DATE_TIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::Invalid(trimmed.to_string()))
}

/// Returns the `YYYY-MM` key of the calendar month containing `instant`.
pub fn month_key(instant: &DateTime<Utc>) -> String {
    instant.format(MONTH_KEY_FORMAT).to_string()
}

/// Returns the first day of the calendar month containing `instant`.
pub fn month_start(instant: &DateTime<Utc>) -> NaiveDate {
    let date = instant.date_naive();
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Parses a `YYYY-MM` key into the first day of that month.
pub fn parse_month_key(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when parsing timestamps supplied by users.
pub enum TimestampError {
    Empty,
    Invalid(String),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Empty => f.write_str("timestamp is empty"),
            TimestampError::Invalid(value) => write!(f, "`{value}` is not an ISO-8601 timestamp"),
        }
    }
}

impl std::error::Error for TimestampError {}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Optional inclusive bounds used to narrow a transaction list.
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Builds a range from raw strings. Blank strings count as unset bounds.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, TimestampError> {
        let parse_bound = |raw: Option<&str>| match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_timestamp(value).map(Some),
        };
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    /// `true` when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if instant < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if instant > end {
                return false;
            }
        }
        true
    }
}
