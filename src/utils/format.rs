use chrono::{DateTime, Utc};

use crate::core::models::ObjectSummary;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Render a byte count with a binary unit, e.g. `1.5 KB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: i64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes.max(0));
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[must_use]
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "unknown date".to_string(),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// One mrkdwn bullet line for a listed object.
#[must_use]
pub fn format_object_line(object: &ObjectSummary) -> String {
    format!(
        "• `{}` ({}, {})",
        object.key,
        human_size(object.size_bytes),
        format_timestamp(object.last_modified.as_ref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_human_size_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn test_human_size_scaled_units() {
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_object_line() {
        let object = ObjectSummary {
            key: "reports/q1.pdf".to_string(),
            size_bytes: 2048,
            last_modified: Some(Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap()),
        };

        assert_eq!(
            format_object_line(&object),
            "• `reports/q1.pdf` (2.0 KB, 2024-03-09 08:05 UTC)"
        );
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "unknown date");
    }
}
