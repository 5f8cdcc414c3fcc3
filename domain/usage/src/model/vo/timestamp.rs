//! Lifecycle timestamps arrive in whichever textual form the store wrote them.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::exception::{UsageException, UsageResult};

/// Naive formats tried in order, all interpreted as UTC.
pub const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a stored timestamp, trying each accepted format before falling back
/// to RFC 3339 with an explicit offset.
pub fn parse_timestamp(value: &str) -> UsageResult<DateTime<Utc>> {
    let trimmed = value.trim();
    for format in ACCEPTED_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| UsageException::MalformedTimestamp {
            value: value.to_owned(),
        })
}

/// Absent and blank values both mean "not reached yet".
pub fn parse_optional_timestamp(value: Option<&str>) -> UsageResult<Option<DateTime<Utc>>> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_timestamp(v).map(Some),
        _ => Ok(None),
    }
}
