use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Convert a source-native timestamp into epoch millis.
///
/// Numbers (and numeric strings) are taken as epoch millis already. Date
/// strings are read as RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or a bare
/// `YYYY-MM-DD`. Anything else sorts last as 0.
pub fn epoch_millis(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => epoch_millis_from_str(s),
        _ => 0,
    }
}

pub fn epoch_millis_from_str(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return millis;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive.and_utc().timestamp_millis();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}
