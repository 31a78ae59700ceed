//! Sunrise, sunset, dawn and dusk.
//!
//! Events are placed symmetrically around the apparent solar noon using the hour angle at which
//! the sun reaches a given altitude `h`:
//!
//! ```text
//! cos H = (sin h − sin φ · sin δ) / (cos φ · cos δ)
//! ```
//!
//! The declination δ is taken once per day at civil noon. When `|cos H| > 1` the sun never
//! crosses `h` that day. The pair then degrades to solar noon ∓ 6 hours and is tagged as
//! [`Geometry::PolarDay`] or [`Geometry::PolarNight`] instead of failing.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::math::{degrees_to_radians, radians_to_degrees};
use crate::noon::SolarNoon;
use crate::solar::solar_coordinates;
use crate::time;
use crate::types::{EventPair, Geometry, Horizon, Location};

/// Minutes of time per degree of hour angle.
const MINUTES_PER_HOUR_ANGLE_DEGREE: f64 = 4.0;

/// Half-width of the fallback window used when the sun never crosses the threshold.
const POLAR_FALLBACK_HOURS: i64 = 6;

/// Hour angle of a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngle {
    /// The sun crosses the threshold at ±H degrees from transit.
    Crossing(f64),
    /// The sun stays above the threshold for the whole day.
    AlwaysAbove,
    /// The sun stays below the threshold for the whole day.
    AlwaysBelow,
}

/// Computes the hour angle at which the sun reaches `altitude`.
///
/// All arguments are in degrees.
#[must_use]
pub fn hour_angle(latitude: f64, declination: f64, altitude: f64) -> HourAngle {
    let phi = degrees_to_radians(latitude);
    let delta = degrees_to_radians(declination);
    let h = degrees_to_radians(altitude);

    let cos_h = (h.sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());

    if cos_h.is_nan() {
        // 0/0 only happens at a pole with the threshold exactly at the declination
        return HourAngle::AlwaysBelow;
    }
    if cos_h > 1.0 {
        HourAngle::AlwaysBelow
    } else if cos_h < -1.0 {
        HourAngle::AlwaysAbove
    } else {
        HourAngle::Crossing(radians_to_degrees(cos_h.acos()))
    }
}

/// Sunrise/sunset and dawn/dusk for one civil day at one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunEvents {
    /// Apparent solar transit, the symmetry axis of both pairs.
    pub transit: DateTime<Utc>,
    /// Geometric sunrise and sunset.
    pub sunrise_sunset: EventPair<DateTime<Utc>>,
    /// Traditional dawn (明け六つ) and dusk (暮れ六つ).
    pub dawn_dusk: EventPair<DateTime<Utc>>,
}

impl SunEvents {
    /// Sunrise instant.
    #[must_use]
    pub const fn sunrise(&self) -> DateTime<Utc> {
        self.sunrise_sunset.rising
    }

    /// Sunset instant.
    #[must_use]
    pub const fn sunset(&self) -> DateTime<Utc> {
        self.sunrise_sunset.setting
    }

    /// Dawn instant (start of the day period).
    #[must_use]
    pub const fn dawn(&self) -> DateTime<Utc> {
        self.dawn_dusk.rising
    }

    /// Dusk instant (end of the day period).
    #[must_use]
    pub const fn dusk(&self) -> DateTime<Utc> {
        self.dawn_dusk.setting
    }

    /// Whether either pair is a polar fallback.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.sunrise_sunset.geometry.is_fallback() || self.dawn_dusk.geometry.is_fallback()
    }
}

/// Calculates one rising/setting pair around the given solar noon.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use edo_time::{Horizon, Location, noon, twilight};
/// use edo_time::zone::{FixedOffsetResolver, MeridianTable};
///
/// let resolver = FixedOffsetResolver::new().with_zone("Asia/Tokyo", 9 * 3600).unwrap();
/// let tokyo = Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
/// let noon = noon::solar_noon(
///     &resolver,
///     &MeridianTable::default(),
///     noon::EquationOfTimeSign::default(),
///     date,
///     &tokyo,
/// ).unwrap();
///
/// let pair = twilight::event_pair(&noon, &tokyo, Horizon::SunriseSunset);
/// assert!(pair.is_regular());
/// assert!(pair.rising < noon.solar_noon && noon.solar_noon < pair.setting);
/// ```
#[must_use]
pub fn event_pair(noon: &SolarNoon, location: &Location, horizon: Horizon) -> EventPair<DateTime<Utc>> {
    let declination = solar_coordinates(&noon.civil_noon).declination();
    let transit = noon.solar_noon;

    match hour_angle(location.latitude(), declination, horizon.altitude()) {
        HourAngle::Crossing(h) => {
            let offset = time::minutes(h * MINUTES_PER_HOUR_ANGLE_DEGREE);
            EventPair {
                rising: transit - offset,
                setting: transit + offset,
                geometry: Geometry::Regular,
            }
        }
        polar => {
            let geometry = if polar == HourAngle::AlwaysAbove {
                Geometry::PolarDay
            } else {
                Geometry::PolarNight
            };
            tracing::debug!(
                latitude = location.latitude(),
                declination,
                altitude = horizon.altitude(),
                ?geometry,
                "sun never crosses threshold, using transit ∓ 6h"
            );
            let offset = Duration::hours(POLAR_FALLBACK_HOURS);
            EventPair {
                rising: transit - offset,
                setting: transit + offset,
                geometry,
            }
        }
    }
}

/// Calculates sunrise/sunset and dawn/dusk around the given solar noon.
#[must_use]
pub fn sun_events(
    noon: &SolarNoon,
    location: &Location,
    sunrise_horizon: Horizon,
    dawn_horizon: Horizon,
) -> SunEvents {
    SunEvents {
        transit: noon.solar_noon,
        sunrise_sunset: event_pair(noon, location, sunrise_horizon),
        dawn_dusk: event_pair(noon, location, dawn_horizon),
    }
}
