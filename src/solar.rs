//! Low-order solar coordinates.
//!
//! Mean longitude and mean anomaly are linear in Julian centuries since J2000.0, with a
//! three-term equation of center. The resulting apparent longitude and declination are good to
//! roughly 0.01°, which translates into event times accurate to a few minutes. This is an
//! approximation, not an ephemeris.

#![allow(clippy::unreadable_literal)]

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::math::{degrees_to_radians, normalize_degrees_0_to_360, polynomial, radians_to_degrees};
use crate::time::JulianDate;

/// Geocentric solar coordinates for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarCoordinates {
    /// True ecliptic longitude in degrees, in [0, 360).
    longitude: f64,
    /// Obliquity of the ecliptic in degrees.
    obliquity: f64,
    /// Declination in degrees.
    declination: f64,
}

impl SolarCoordinates {
    /// True ecliptic longitude in degrees, normalized to [0, 360).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Obliquity of the ecliptic in degrees.
    #[must_use]
    pub const fn obliquity(&self) -> f64 {
        self.obliquity
    }

    /// Declination in degrees (positive north).
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }
}

/// Calculates solar coordinates for an instant.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use edo_time::solar;
///
/// let equinox = "2026-03-20T14:46:00Z".parse::<DateTime<Utc>>().unwrap();
/// let sun = solar::solar_coordinates(&equinox);
/// assert!(sun.longitude() < 0.1 || sun.longitude() > 359.9);
/// assert!(sun.declination().abs() < 0.1);
/// ```
pub fn solar_coordinates<Tz: TimeZone>(datetime: &DateTime<Tz>) -> SolarCoordinates {
    solar_coordinates_from_julian(JulianDate::from_datetime(datetime))
}

/// Calculates solar coordinates from a Julian date.
#[must_use]
pub fn solar_coordinates_from_julian(jd: JulianDate) -> SolarCoordinates {
    let days = jd.days_since_j2000();
    let longitude = true_longitude(jd.julian_century());
    let obliquity = obliquity_of_ecliptic(days);
    let declination = declination(longitude, obliquity);

    SolarCoordinates {
        longitude,
        obliquity,
        declination,
    }
}

/// Mean longitude L in degrees (not normalized).
fn mean_longitude(t: f64) -> f64 {
    polynomial(&[280.4665, 36000.7698], t)
}

/// Mean anomaly M in degrees (not normalized).
fn mean_anomaly(t: f64) -> f64 {
    polynomial(&[357.5291, 35999.0503], t)
}

/// Equation of center C in degrees.
fn equation_of_center(t: f64, mean_anomaly_degrees: f64) -> f64 {
    let m = degrees_to_radians(mean_anomaly_degrees);
    polynomial(&[1.9146, -0.004817, -0.000014], t) * m.sin()
        + polynomial(&[0.019993, -0.000101], t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin()
}

/// True longitude L + C, normalized to [0, 360).
fn true_longitude(t: f64) -> f64 {
    let m = mean_anomaly(t);
    normalize_degrees_0_to_360(mean_longitude(t) + equation_of_center(t, m))
}

/// Obliquity of the ecliptic in degrees from days since J2000.0.
fn obliquity_of_ecliptic(days_since_j2000: f64) -> f64 {
    23.4393 - 0.0000004 * days_since_j2000
}

/// Declination δ = asin(sin λ · sin ε) in degrees.
fn declination(longitude: f64, obliquity: f64) -> f64 {
    let lambda = degrees_to_radians(longitude);
    let epsilon = degrees_to_radians(obliquity);
    radians_to_degrees((lambda.sin() * epsilon.sin()).asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_coordinates_at_j2000() {
        let sun = solar_coordinates(&utc("2000-01-01T12:00:00Z"));
        // L0 = 280.4665, M = 357.5291 → C ≈ -0.0822
        assert!((sun.longitude() - 280.384).abs() < 0.01, "{}", sun.longitude());
        assert!((sun.obliquity() - 23.4393).abs() < 1e-9);
        assert!((sun.declination() + 23.03).abs() < 0.05, "{}", sun.declination());
    }

    #[test]
    fn test_solstices_and_equinoxes() {
        // June solstice 2026-06-21 08:24 UTC
        let june = solar_coordinates(&utc("2026-06-21T08:24:00Z"));
        assert!((june.longitude() - 90.0).abs() < 0.05, "{}", june.longitude());
        assert!((june.declination() - 23.43).abs() < 0.05);

        // December solstice 2026-12-21 20:50 UTC
        let december = solar_coordinates(&utc("2026-12-21T20:50:00Z"));
        assert!((december.longitude() - 270.0).abs() < 0.05);
        assert!((december.declination() + 23.43).abs() < 0.05);

        // September equinox 2026-09-23 00:05 UTC
        let september = solar_coordinates(&utc("2026-09-23T00:05:00Z"));
        assert!((september.longitude() - 180.0).abs() < 0.05);
        assert!(september.declination().abs() < 0.05);
    }

    #[test]
    fn test_longitude_always_normalized() {
        let start = utc("1990-01-01T00:00:00Z");
        for step in 0..2000 {
            let instant = start + Duration::hours(step * 197);
            let sun = solar_coordinates(&instant);
            assert!(
                (0.0..360.0).contains(&sun.longitude()),
                "longitude {} out of range at {instant}",
                sun.longitude()
            );
            assert!(sun.declination().abs() <= sun.obliquity() + 1e-9);
        }
    }

    #[test]
    fn test_obliquity_decreases_slowly() {
        let now = solar_coordinates(&utc("2026-01-01T00:00:00Z"));
        let century_later = solar_coordinates(&utc("2126-01-01T00:00:00Z"));
        let drop = now.obliquity() - century_later.obliquity();
        assert!((drop - 0.0146).abs() < 0.001, "{drop}");
    }
}
