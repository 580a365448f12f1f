//! Time utility functions

use std::time::SystemTime;

use chrono::{DateTime, TimeZone, Utc};

/// Convert a `SystemTime` to nanoseconds since Unix epoch.
///
/// Times before the epoch clamp to 0, times past `u64::MAX` nanoseconds
/// (year 2554) clamp to `u64::MAX`.
pub fn system_time_to_nanos(time: SystemTime) -> u64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(elapsed) => u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        Err(_) => 0,
    }
}

/// Convert nanoseconds since Unix epoch to DateTime<Utc>
pub fn nanos_to_datetime(nanos: u64) -> DateTime<Utc> {
    let secs = (nanos / 1_000_000_000) as i64;
    let nsecs = (nanos % 1_000_000_000) as u32;
    Utc.timestamp_opt(secs, nsecs).single().unwrap_or_else(|| {
        tracing::warn!(nanos, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Convert nanoseconds since Unix epoch to ISO 8601 string (microsecond precision)
pub fn nanos_to_iso(nanos: u64) -> String {
    nanos_to_datetime(nanos).to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::time::Duration;

    #[test]
    fn test_system_time_to_nanos_epoch() {
        assert_eq!(system_time_to_nanos(SystemTime::UNIX_EPOCH), 0);
    }

    #[test]
    fn test_system_time_to_nanos_known_value() {
        let time = SystemTime::UNIX_EPOCH + Duration::new(1_704_067_200, 123);
        assert_eq!(system_time_to_nanos(time), 1_704_067_200_000_000_123);
    }

    #[test]
    fn test_system_time_to_nanos_before_epoch_clamps() {
        let time = SystemTime::UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(system_time_to_nanos(time), 0);
    }

    #[test]
    fn test_nanos_to_datetime_epoch() {
        let dt = nanos_to_datetime(0);
        assert_eq!(dt.year(), 1970);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_nanos_to_datetime_with_subsecond() {
        let nanos = 1_500_000_000;
        let dt = nanos_to_datetime(nanos);
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn test_nanos_to_datetime_known_value() {
        // 2024-01-01 12:30:00 UTC
        let nanos = 1_704_112_200_u64 * 1_000_000_000;
        let dt = nanos_to_datetime(nanos);
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_nanos_to_iso_format() {
        assert_eq!(nanos_to_iso(1_500_000_000), "1970-01-01T00:00:01.500000Z");
    }
}
