//! Apparent solar noon.
//!
//! Solar transit on a civil day is civil noon shifted by two corrections:
//!
//! - the longitude correction, 4 minutes per degree between the zone's standard meridian and the
//!   observer (east of the meridian the sun transits earlier);
//! - the equation of time, `EoT = 9.87·sin 2B − 7.53·cos B − 1.5·sin B` minutes with
//!   `B = 2π(N − 81)/365` for day-of-year `N`.
//!
//! By default `solar noon = civil noon + (longitude correction − EoT)`. Published sources
//! disagree on the sign of the EoT term for this approximation, so it is configurable through
//! [`EquationOfTimeSign`].
//!
//! The standard meridian belongs to standard time. When daylight saving is in effect, civil
//! noon comes one shift earlier in UTC, so the shift is added back.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::math::{PI, positive_modulo};
use crate::time::{self, as_days};
use crate::types::Location;
use crate::zone::{MeridianSource, MeridianTable, TimeZoneResolver};
use crate::{Error, Result};

/// Minutes of time per degree of longitude.
const MINUTES_PER_DEGREE: f64 = 4.0;

/// How the equation of time enters the solar-noon formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationOfTimeSign {
    /// `solar noon = civil noon + (longitude correction − EoT)`
    #[default]
    Subtract,
    /// `solar noon = civil noon + (longitude correction + EoT)`
    Add,
}

impl EquationOfTimeSign {
    const fn factor(self) -> f64 {
        match self {
            Self::Subtract => -1.0,
            Self::Add => 1.0,
        }
    }
}

/// Solar transit for one civil day at one location, with its intermediate terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarNoon {
    /// 12:00 local civil time.
    pub civil_noon: DateTime<Utc>,
    /// Apparent solar transit.
    pub solar_noon: DateTime<Utc>,
    /// 1-based day of the year used for the equation of time.
    pub day_of_year: u32,
    /// Equation of time in minutes.
    pub equation_of_time: f64,
    /// Longitude correction in minutes.
    pub longitude_correction: f64,
    /// Standard meridian of the zone, in degrees east.
    pub standard_meridian: f64,
    /// Where the standard meridian came from.
    pub meridian_source: MeridianSource,
    /// Daylight-saving shift at civil noon, in minutes.
    pub daylight_saving: f64,
}

/// Equation of time in minutes for a 1-based day of the year.
///
/// # Example
/// ```
/// use edo_time::noon::equation_of_time;
///
/// // early November: the sun runs about 16 minutes fast
/// assert!(equation_of_time(307) > 16.0);
/// // mid February: about 14 minutes slow
/// assert!(equation_of_time(43) < -14.0);
/// ```
#[must_use]
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (f64::from(day_of_year) - 81.0) / 365.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Longitude correction in minutes: `4 × (standard meridian − longitude)`.
///
/// The difference is taken the short way round, in `[−180°, 180°)`, so meridians derived from
/// offsets beyond ±12 h (Kiritimati at +14 h sits on 210°) still pair with western longitudes.
#[must_use]
pub fn longitude_correction(standard_meridian: f64, longitude: f64) -> f64 {
    let difference = positive_modulo(standard_meridian - longitude + 180.0, 360.0) - 180.0;
    MINUTES_PER_DEGREE * difference
}

/// 1-based day of the year, counted in civil days from January 1 noon in the same zone.
///
/// # Errors
/// Propagates resolver errors.
pub fn day_of_year<R: TimeZoneResolver + ?Sized>(
    resolver: &R,
    date: NaiveDate,
    zone: &str,
) -> Result<u32> {
    let january_first = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .ok_or_else(|| Error::invalid_datetime("year out of range"))?;
    let start = resolver.noon_instant(january_first, zone)?;
    let noon = resolver.noon_instant(date, zone)?;
    // daylight saving moves noon by at most a few hours, so rounding recovers whole days
    let elapsed = as_days(noon - start).round();
    Ok(elapsed as u32 + 1)
}

/// Calculates the apparent solar noon for a civil date at a location.
///
/// # Errors
/// Propagates resolver errors for unknown zones or non-existent local noon.
pub fn solar_noon<R: TimeZoneResolver + ?Sized>(
    resolver: &R,
    meridians: &MeridianTable,
    sign: EquationOfTimeSign,
    date: NaiveDate,
    location: &Location,
) -> Result<SolarNoon> {
    let civil_noon = resolver.noon_instant(date, location.zone())?;
    let (standard_meridian, meridian_source) =
        meridians.resolve(resolver, location.zone(), civil_noon);
    let day_of_year = day_of_year(resolver, date, location.zone())?;
    let equation_of_time = equation_of_time(day_of_year);
    let longitude_correction = longitude_correction(standard_meridian, location.longitude());
    let daylight_saving =
        resolver.dst_offset(location.zone(), civil_noon).num_seconds() as f64 / 60.0;

    let offset = daylight_saving + longitude_correction + sign.factor() * equation_of_time;
    let solar_noon = civil_noon + time::minutes(offset);

    Ok(SolarNoon {
        civil_noon,
        solar_noon,
        day_of_year,
        equation_of_time,
        longitude_correction,
        standard_meridian,
        meridian_source,
        daylight_saving,
    })
}
