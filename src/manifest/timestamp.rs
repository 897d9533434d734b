//! Release timestamps.
//!
//! `released_at` accepts the ISO 8601 shapes people actually write in YAML:
//! RFC 3339 with an offset, date-times without one (taken as UTC), and bare
//! dates (midnight UTC). A `!!timestamp`-tagged scalar is unwrapped first.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_yaml::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Length of the rolling release window.
pub const RELEASE_WINDOW_MONTHS: u32 = 12;

/// Parse a `released_at` value.
pub fn parse(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Tagged(tagged) if tagged.tag.to_string().ends_with("timestamp") => {
            parse(&tagged.value)
        }
        _ => None,
    }
}

/// Parse an ISO 8601 string.
pub fn parse_str(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Oldest acceptable release instant relative to `now`.
pub fn window_start(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    now.checked_sub_months(Months::new(RELEASE_WINDOW_MONTHS))
}

/// Render a timestamp for messages.
pub fn display(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
