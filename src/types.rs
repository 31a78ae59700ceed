//! Core data types shared across the crate.

use serde::Serialize;

use crate::error::{check_altitude, check_coordinates};
use crate::math::dms_to_degrees;
use crate::Result;

/// An observer location with the civil time zone it keeps.
///
/// # Example
/// ```
/// # use edo_time::Location;
/// let tokyo = Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap();
/// assert_eq!(tokyo.zone(), "Asia/Tokyo");
/// assert!(Location::new(95.0, 0.0, "UTC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Latitude in degrees (-90 to +90, positive north)
    latitude: f64,
    /// Longitude in degrees (-180 to +180, positive east)
    longitude: f64,
    /// IANA time zone identifier
    zone: String,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64, zone: impl Into<String>) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            zone: zone.into(),
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// IANA time zone identifier.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

/// Solar altitude thresholds for rise/set style events.
///
/// Unlike modern almanacs, the Edo reckoning uses the geometric horizon (0°) for sunrise and
/// sunset, and −7°21′40″ for the dawn (明け六つ) and dusk (暮れ六つ) that bound the
/// temporal-hour day. That depression angle is the one adopted by the Kansei-era calendar
/// reform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Horizon {
    /// Sun centre on the geometric horizon (0°)
    SunriseSunset,
    /// Sun centre at −7°21′40″, the traditional dawn/dusk boundary
    DawnDusk,
    /// Custom altitude in degrees
    Custom(f64),
}

impl Horizon {
    /// Gets the altitude angle in degrees for this horizon definition.
    #[must_use]
    pub fn altitude(&self) -> f64 {
        match self {
            Self::SunriseSunset => 0.0,
            Self::DawnDusk => dms_to_degrees(-7, 21, 40.0),
            Self::Custom(angle) => *angle,
        }
    }

    /// Creates a custom horizon with the specified altitude.
    ///
    /// # Errors
    /// Returns `InvalidAltitude` if altitude is outside -90 to +90 degrees.
    pub fn custom(altitude_degrees: f64) -> Result<Self> {
        check_altitude(altitude_degrees)?;
        Ok(Self::Custom(altitude_degrees))
    }
}

/// How an event pair was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// The sun crosses the threshold twice; times come from the hour-angle formula.
    Regular,
    /// The sun stays above the threshold all day; times are transit ∓ 6 hours.
    PolarDay,
    /// The sun stays below the threshold all day; times are transit ∓ 6 hours.
    PolarNight,
}

impl Geometry {
    /// Whether the event times are a fallback rather than real threshold crossings.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        !matches!(self, Self::Regular)
    }
}

/// A morning/evening pair of threshold crossings around one solar transit.
///
/// Generic over the time type like the rest of the event API; the crate itself uses
/// `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventPair<T> {
    /// Morning crossing (sunrise or dawn)
    pub rising: T,
    /// Evening crossing (sunset or dusk)
    pub setting: T,
    /// Whether the pair is real or a polar fallback
    pub geometry: Geometry,
}

impl<T> EventPair<T> {
    /// Checks if this represents a regular day with two real crossings.
    pub const fn is_regular(&self) -> bool {
        matches!(self.geometry, Geometry::Regular)
    }
}
