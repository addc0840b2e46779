//! Finnish-locale display formatting for backend timestamps
//!
//! The backend sends dates as RFC 3339 timestamps, MySQL-style
//! `YYYY-MM-DD HH:MM:SS` strings, or bare `YYYY-MM-DD` dates. Timestamps
//! that carry an offset are shown in Finnish local time (`Europe/Helsinki`)
//! whatever the host's zone is; naive ones are taken as already local.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Europe::Helsinki;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse any timestamp shape the backend is known to send, as Helsinki
/// wall-clock time
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Helsinki).naive_local());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `d.M.yyyy`, e.g. `5.1.2024`
#[must_use]
pub fn fi_date(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%-d.%-m.%Y").to_string())
}

/// `HH:MM:SS`, e.g. `09:05:00`
#[must_use]
pub fn fi_time(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%H:%M:%S").to_string())
}
