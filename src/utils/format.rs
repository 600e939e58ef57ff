//! Display formatting
//!
//! Byte sizes and relative dates as the dashboards show them.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Formats a byte count in base-1024 units with at most two decimals.
///
/// Trailing zeros are dropped: `1536` is `1.5 KB`, `1048576` is `1 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Round to two places, then let f64's Display drop trailing zeros.
    let rounded: f64 = format!("{:.2}", value).parse().unwrap_or(value);
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Describes `date` relative to `now`.
///
/// Day counts round up, so anything under 24 hours away is `Today` and the
/// next day is `Yesterday`. Dates more than a week away are printed in full.
pub fn format_date(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff_ms = (*now - *date).num_milliseconds().abs();
    let diff_days = (diff_ms + DAY_MS - 1) / DAY_MS;

    match diff_days {
        0 | 1 => "Today".to_string(),
        2 => "Yesterday".to_string(),
        3..=7 => format!("{} days ago", diff_days - 1),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}
