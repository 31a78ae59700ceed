//! Time arguments for the astronomical approximations.
//!
//! Instants are `chrono::DateTime<Utc>`; this module converts them to Julian dates and to the
//! day/century counts since the J2000.0 epoch used by [`crate::solar`], and provides the
//! fractional-duration arithmetic shared by the twilight and temporal-hour code.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Seconds per day (86,400)
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Milliseconds per day.
pub const MILLIS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
pub const J2000_JDN: f64 = 2_451_545.0;

/// Julian Day Number of the Unix epoch (1970-01-01 00:00:00 UTC)
const UNIX_EPOCH_JDN: f64 = 2_440_587.5;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_588;

/// Julian date of an instant, treated as UTC-equivalent.
///
/// No ΔT correction is applied: the low-order solar formulas in this crate tolerate the
/// roughly one-minute difference between UT and TT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    jd: f64,
}

impl JulianDate {
    /// Creates a Julian date from any timezone-aware instant.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let millis = datetime.timestamp_millis() as f64;
        Self {
            jd: UNIX_EPOCH_JDN + millis / MILLIS_PER_DAY,
        }
    }

    /// Creates a Julian date from a raw JD value.
    #[must_use]
    pub const fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    /// Gets the Julian Date (JD) value.
    #[must_use]
    pub const fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Days elapsed since J2000.0 (2000-01-01T12:00:00Z), negative before the epoch.
    #[must_use]
    pub fn days_since_j2000(&self) -> f64 {
        self.jd - J2000_JDN
    }

    /// Julian centuries since J2000.0: `T = days / 36525`.
    #[must_use]
    pub fn julian_century(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }
}

/// The J2000.0 epoch as a UTC instant.
#[must_use]
pub fn j2000_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(946_728_000, 0).unwrap_or_default()
}

/// Converts fractional minutes to a `Duration`, truncated to whole milliseconds.
#[must_use]
pub fn minutes(value: f64) -> Duration {
    Duration::milliseconds((value * 60_000.0) as i64)
}

/// Converts fractional days to a `Duration`, truncated to whole milliseconds.
#[must_use]
pub fn days(value: f64) -> Duration {
    Duration::milliseconds((value * MILLIS_PER_DAY) as i64)
}

/// Length of a `Duration` in fractional days.
#[must_use]
pub fn as_days(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_DAY
}
