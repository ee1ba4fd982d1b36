use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// This is the standard way of converting a moment to a string in progress-tracker. Fractional
/// seconds are only written when present.
pub fn format_timestamp(moment: NaiveDateTime) -> String {
    moment.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Parses a local ISO-8601 timestamp. Strings carrying an offset are converted into local time.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value).map(|v| v.with_timezone(&Local).naive_local())
        })
        .with_context(|| format!("Can't parse timestamp {value:?}"))
}
