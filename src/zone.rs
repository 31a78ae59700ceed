//! Civil time zone resolution.
//!
//! Everything downstream works on UTC instants. The [`TimeZoneResolver`] trait is the one seam
//! where civil time enters: it maps an instant to the local calendar date, and a calendar date
//! to the instant of local 12:00. [`TzResolver`] implements it on top of the IANA database
//! (`tz` feature); [`FixedOffsetResolver`] uses a table of fixed offsets and is handy for tests
//! and embedded use.
//!
//! The standard meridian used by [`crate::noon`] is resolved here too, through
//! [`MeridianTable`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::{Error, Result};

/// Standard meridian used when a zone cannot be resolved any other way (Japan Standard Time).
pub const DEFAULT_STANDARD_MERIDIAN: f64 = 135.0;

/// Converts between UTC instants and civil calendar days in a named zone.
pub trait TimeZoneResolver {
    /// Civil calendar date of `instant` in `zone`.
    ///
    /// # Errors
    /// Returns `UnknownTimeZone` if the zone cannot be resolved.
    fn calendar_date(&self, instant: DateTime<Utc>, zone: &str) -> Result<NaiveDate>;

    /// The instant of 12:00 local civil time on `date` in `zone`.
    ///
    /// # Errors
    /// Returns `UnknownTimeZone` if the zone cannot be resolved, or `InvalidDateTime` if local
    /// noon does not exist on that date.
    fn noon_instant(&self, date: NaiveDate, zone: &str) -> Result<DateTime<Utc>>;

    /// Standard (non-daylight-saving) UTC offset of `zone` around `instant`, when known.
    fn standard_offset(&self, _zone: &str, _instant: DateTime<Utc>) -> Option<Duration> {
        None
    }

    /// Daylight-saving shift in effect in `zone` at `instant`; zero when unknown.
    fn dst_offset(&self, _zone: &str, _instant: DateTime<Utc>) -> Duration {
        Duration::zero()
    }
}

fn local_noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn noon_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(local_noon()))
        .earliest()
        .map(|noon| noon.with_timezone(&Utc))
        .ok_or_else(|| Error::invalid_datetime("local noon does not exist on this date"))
}

/// Resolver backed by a table of fixed UTC offsets.
///
/// `"UTC"` and `"Etc/UTC"` are always known.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use edo_time::zone::{FixedOffsetResolver, TimeZoneResolver};
///
/// let resolver = FixedOffsetResolver::new().with_zone("Asia/Tokyo", 9 * 3600).unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
/// let noon = resolver.noon_instant(date, "Asia/Tokyo").unwrap();
/// assert_eq!(noon.to_rfc3339(), "2026-06-21T03:00:00+00:00");
/// ```
#[derive(Debug, Clone)]
pub struct FixedOffsetResolver {
    offsets: HashMap<String, FixedOffset>,
}

impl Default for FixedOffsetResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedOffsetResolver {
    /// Creates a resolver that knows only UTC.
    #[must_use]
    pub fn new() -> Self {
        let mut offsets = HashMap::new();
        let utc = Utc.fix();
        offsets.insert("UTC".to_owned(), utc);
        offsets.insert("Etc/UTC".to_owned(), utc);
        Self { offsets }
    }

    /// Adds a zone with an offset in seconds east of UTC.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the offset is not within ±24 hours.
    pub fn with_zone(mut self, zone: impl Into<String>, offset_seconds: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| Error::invalid_datetime("UTC offset must be within ±24 hours"))?;
        self.offsets.insert(zone.into(), offset);
        Ok(self)
    }

    fn offset(&self, zone: &str) -> Result<&FixedOffset> {
        self.offsets
            .get(zone)
            .ok_or_else(|| Error::unknown_time_zone(zone))
    }
}

impl TimeZoneResolver for FixedOffsetResolver {
    fn calendar_date(&self, instant: DateTime<Utc>, zone: &str) -> Result<NaiveDate> {
        Ok(instant.with_timezone(self.offset(zone)?).date_naive())
    }

    fn noon_instant(&self, date: NaiveDate, zone: &str) -> Result<DateTime<Utc>> {
        noon_in(self.offset(zone)?, date)
    }

    fn standard_offset(&self, zone: &str, _instant: DateTime<Utc>) -> Option<Duration> {
        self.offsets
            .get(zone)
            .map(|offset| Duration::seconds(i64::from(offset.local_minus_utc())))
    }
}

/// Resolver backed by the IANA time zone database via `chrono-tz`.
#[cfg(feature = "tz")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TzResolver;

#[cfg(feature = "tz")]
impl TzResolver {
    fn parse(zone: &str) -> Result<chrono_tz::Tz> {
        zone.parse::<chrono_tz::Tz>()
            .map_err(|_| Error::unknown_time_zone(zone))
    }
}

#[cfg(feature = "tz")]
impl TimeZoneResolver for TzResolver {
    fn calendar_date(&self, instant: DateTime<Utc>, zone: &str) -> Result<NaiveDate> {
        let tz = Self::parse(zone)?;
        Ok(instant.with_timezone(&tz).date_naive())
    }

    fn noon_instant(&self, date: NaiveDate, zone: &str) -> Result<DateTime<Utc>> {
        noon_in(&Self::parse(zone)?, date)
    }

    fn standard_offset(&self, zone: &str, instant: DateTime<Utc>) -> Option<Duration> {
        use chrono_tz::OffsetComponents;

        let tz = Self::parse(zone).ok()?;
        let offset = tz.offset_from_utc_datetime(&instant.naive_utc());
        Some(offset.base_utc_offset())
    }

    fn dst_offset(&self, zone: &str, instant: DateTime<Utc>) -> Duration {
        use chrono_tz::OffsetComponents;

        Self::parse(zone).map_or_else(
            |_| Duration::zero(),
            |tz| tz.offset_from_utc_datetime(&instant.naive_utc()).dst_offset(),
        )
    }
}

/// Standard meridians for common zones, in degrees east.
const BUILTIN_MERIDIANS: &[(&str, f64)] = &[
    ("Asia/Tokyo", 135.0),
    ("Japan", 135.0),
    ("Asia/Seoul", 135.0),
    ("Asia/Shanghai", 120.0),
    ("Asia/Taipei", 120.0),
    ("Asia/Hong_Kong", 120.0),
    ("Asia/Singapore", 120.0),
    ("Asia/Kolkata", 82.5),
    ("Australia/Sydney", 150.0),
    ("Pacific/Auckland", 180.0),
    ("Pacific/Honolulu", -150.0),
    ("America/Anchorage", -135.0),
    ("America/Los_Angeles", -120.0),
    ("America/Denver", -105.0),
    ("America/Chicago", -90.0),
    ("America/New_York", -75.0),
    ("America/Sao_Paulo", -45.0),
    ("Europe/London", 0.0),
    ("Europe/Paris", 15.0),
    ("Europe/Berlin", 15.0),
    ("UTC", 0.0),
    ("Etc/UTC", 0.0),
];

/// Where a standard meridian came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeridianSource {
    /// Explicit configuration override.
    Configured,
    /// Built-in zone table.
    Table,
    /// Derived from the zone's standard UTC offset (15° per hour).
    Offset,
    /// Nothing matched; the configured default was used.
    Default,
}

/// IANA zone → standard meridian mapping with configurable overrides.
#[derive(Debug, Clone)]
pub struct MeridianTable {
    overrides: HashMap<String, f64>,
    default: f64,
}

impl Default for MeridianTable {
    fn default() -> Self {
        Self::new(HashMap::new(), DEFAULT_STANDARD_MERIDIAN)
    }
}

impl MeridianTable {
    /// Creates a table with explicit overrides and a fallback meridian.
    #[must_use]
    pub const fn new(overrides: HashMap<String, f64>, default: f64) -> Self {
        Self { overrides, default }
    }

    /// Resolves the standard meridian for `zone`.
    ///
    /// Lookup order: configured overrides, the built-in table, the resolver's standard offset,
    /// and finally the configured default.
    pub fn resolve<R: TimeZoneResolver + ?Sized>(
        &self,
        resolver: &R,
        zone: &str,
        instant: DateTime<Utc>,
    ) -> (f64, MeridianSource) {
        if let Some(&meridian) = self.overrides.get(zone) {
            return (meridian, MeridianSource::Configured);
        }
        if let Some(&(_, meridian)) = BUILTIN_MERIDIANS.iter().find(|(name, _)| *name == zone) {
            return (meridian, MeridianSource::Table);
        }
        if let Some(offset) = resolver.standard_offset(zone, instant) {
            let meridian = offset.num_seconds() as f64 / 240.0;
            tracing::debug!(zone, meridian, "standard meridian derived from UTC offset");
            return (meridian, MeridianSource::Offset);
        }
        tracing::warn!(
            zone,
            meridian = self.default,
            "no standard meridian known for zone, using default"
        );
        (self.default, MeridianSource::Default)
    }
}
