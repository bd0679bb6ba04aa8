/// Time utilities for parsing and formatting instants
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Utc};

use crate::error::{CalendarError, Result};

/// Output format of next-event timestamps (always UTC, second precision)
pub const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render an instant as `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_utc_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format(UTC_TIMESTAMP_FORMAT).to_string()
}

/// Parse an RFC 3339 instant. Text without an explicit offset is rejected.
pub fn parse_instant(input: &str) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();
    match DateTime::parse_from_rfc3339(input) {
        Ok(instant) => Ok(instant),
        Err(e) => {
            let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f"));
            if naive.is_ok() {
                Err(CalendarError::InvalidInstant(format!(
                    "{} has no timezone offset",
                    input
                )))
            } else {
                Err(CalendarError::InvalidInstant(format!("{}: {}", input, e)))
            }
        }
    }
}

/// Parse a wall-clock session time in `HH:MM:SS` or `HH:MM` form
pub fn parse_session_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| CalendarError::InvalidSessionTime(format!("{}: {}", value, e)))
}
