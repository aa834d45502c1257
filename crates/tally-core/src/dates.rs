//! Date and interval helpers
//!
//! All calendar math runs in UTC. Transaction timestamps are stored as text and
//! parsed on demand; anything that fails to parse comes back as `None` so the
//! caller can leave it out instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Naive formats accepted in addition to RFC 3339
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 (`2026-10-18T09:30:00.000Z`, `2026-10-18T15:00:00+05:30`),
/// naive date-times (interpreted as UTC) and bare dates (start of day).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// Parse a day-level bound (`YYYY-MM-DD`, or any timestamp whose date part is used)
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(s).map(|dt| dt.date_naive()))
}

/// First instant of a day
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::default()).and_utc()
}

/// Last representable instant of a day
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999999999 always exists
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or_default();
    day.and_time(last).and_utc()
}

/// Inclusive interval membership
pub fn is_within(ts: &DateTime<Utc>, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    ts >= start && ts <= end
}

/// Format a day compactly for summaries, e.g. `1 Oct 2026`
pub fn format_day(day: NaiveDate) -> String {
    day.format("%-d %b %Y").to_string()
}
