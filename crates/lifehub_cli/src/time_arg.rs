//! Timestamp arguments.

use anyhow::bail;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` (UTC) into epoch ms.
pub fn parse_timestamp(value: &str) -> anyhow::Result<i64> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(parsed.and_utc().timestamp_millis());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().timestamp_millis());
    }
    bail!("unrecognized timestamp `{value}`; use RFC 3339 or `YYYY-MM-DD HH:MM`")
}
