//! Time conversions for ASF timestamps.
//!
//! ASF counts time in 100-nanosecond "ticks". Absolute timestamps
//! (creation date, encoding time) are ticks since 1601-01-01 UTC, the
//! Windows FILETIME epoch; durations are plain tick counts.

use std::time::Duration;

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Ticks per second (one tick is 100 ns).
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Seconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// Convert a FILETIME tick count into an absolute timestamp.
///
/// Returns `None` if the tick count falls outside chrono's representable
/// range.
pub fn filetime_to_datetime(ticks: u64) -> Option<DateTime<Utc>> {
    let micros = i64::try_from(ticks / 10).ok()?;
    let unix_micros = micros.checked_sub(FILETIME_UNIX_OFFSET_SECS.checked_mul(1_000_000)?)?;
    DateTime::from_timestamp_micros(unix_micros)
}

/// Convert an absolute timestamp into FILETIME ticks.
///
/// Timestamps before the FILETIME epoch clamp to zero.
pub fn datetime_to_filetime(at: DateTime<Utc>) -> u64 {
    let unix_micros = at.timestamp_micros();
    let filetime_micros = unix_micros.saturating_add(FILETIME_UNIX_OFFSET_SECS * 1_000_000);
    if filetime_micros <= 0 {
        0
    } else {
        filetime_micros as u64 * 10
    }
}

/// Convert a tick count into an elapsed-time value.
pub fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_micros(ticks / 10) + Duration::from_nanos((ticks % 10) * 100)
}

/// Convert an elapsed-time value into ticks.
pub fn duration_to_ticks(duration: Duration) -> u64 {
    (duration.as_nanos() / 100) as u64
}

/// Parse a 4-digit year string into a Jan-1 timestamp of that year.
pub fn year_to_datetime(year: &str) -> Option<DateTime<Utc>> {
    let year: i32 = year.trim().parse().ok()?;
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// Format a timestamp as its year.
pub fn datetime_year(at: DateTime<Utc>) -> String {
    at.year().to_string()
}
