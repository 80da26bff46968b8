//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// ISO-8601 timestamp with millisecond precision and `Z` suffix
///
/// Example: `2026-10-16T09:30:00.000Z`
pub fn to_iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Short en-US calendar date, e.g. `Oct 16, 2026`
///
/// The date is rendered in whatever zone `timestamp` carries; callers that
/// want the viewer's calendar day convert to `chrono::Local` first.
pub fn format_display_date<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%b %-d, %Y").to_string()
}

/// Convert milliseconds to duration
pub fn millis_to_duration(millis: u64) -> std::time::Duration {
    std::time::Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_iso8601_has_millis_and_zulu_suffix() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        assert_eq!(to_iso8601(&ts), "2026-10-16T09:30:00.000Z");
    }

    #[test]
    fn test_display_date_short_month_no_padding() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_display_date(&ts), "Mar 7, 2026");
    }

    #[test]
    fn test_display_date_two_digit_day() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        assert_eq!(format_display_date(&ts), "Oct 16, 2026");
    }

    #[test]
    fn test_display_date_uses_carried_zone() {
        // 23:30 UTC on the 16th is already the 17th at UTC+2
        let utc = Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_display_date(&utc.with_timezone(&plus_two)), "Oct 17, 2026");
    }

    #[test]
    fn test_millis_to_duration() {
        assert_eq!(millis_to_duration(2000), Duration::from_secs(2));
        assert_eq!(millis_to_duration(0), Duration::ZERO);
    }
}
