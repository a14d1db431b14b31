//! Date Range
//!
//! Inclusive start/end date pair attached to every metrics query and every
//! aggregation result. Serializes with the `start_date`/`end_date` field
//! names the upstream APIs and downstream consumers expect.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range for a metrics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// January 1 of the current year through today. The default window when
    /// a caller supplies no dates.
    pub fn year_to_date() -> Self {
        let today = Utc::now().date_naive();
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }

    /// The last `days` days ending today. Windows reaching past the
    /// representable date range saturate at the calendar minimum rather
    /// than panicking inside chrono.
    pub fn trailing_days(days: i64) -> Self {
        let today = Utc::now().date_naive();
        let start = Duration::try_days(days)
            .and_then(|d| today.checked_sub_signed(d))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// `YYYY-MM-DD` form of the start date, as upstream query params expect.
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM-DD` form of the end date.
    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Start of range as a UTC timestamp string (midnight), for endpoints
    /// that filter on full timestamps rather than dates.
    pub fn start_timestamp(&self) -> String {
        format!("{}T00:00:00Z", self.start_str())
    }

    /// End of range as a UTC timestamp string (end of day).
    pub fn end_timestamp(&self) -> String {
        format!("{}T23:59:59Z", self.end_str())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start_str(), self.end_str())
    }
}
