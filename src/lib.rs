//! # Edo Time
//!
//! Traditional Japanese time and calendar observations for a modern instant and location.
//!
//! Given a UTC instant and a [`Location`], the library computes:
//!
//! - the sun's ecliptic longitude and declination (low-order approximation, ±0.01°);
//! - apparent solar noon, sunrise/sunset and the traditional dawn/dusk at −7°21′40″;
//! - the temporal hour (不定時法): six variable-length koku between dawn and dusk, six more
//!   between dusk and the next dawn;
//! - the solar term (二十四節気) and micro-season (七十二候);
//! - the lunisolar date and rokuyo (六曜) from a reference table;
//! - the moon age (月齢) and phase from a table of new moons.
//!
//! The astronomy is accurate to a few minutes, which is ample for a clock whose hours are
//! about two modern hours long. It is not an ephemeris.
//!
//! ## Feature Flags
//!
//! - `tz` (default): IANA time zones through `chrono-tz` ([`zone::TzResolver`])
//! - `cli` (default): the `edo-time` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use edo_time::{EdoClock, Location, ReferenceData};
//! use edo_time::zone::FixedOffsetResolver;
//!
//! let data = ReferenceData::bundled()?;
//! let resolver = FixedOffsetResolver::new().with_zone("Asia/Tokyo", 9 * 3600)?;
//! let clock = EdoClock::new(resolver, &data);
//!
//! let asakusa = Location::new(35.7148, 139.7967, "Asia/Tokyo")?;
//! let instant = "2026-08-15T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
//! let edo = clock.compute(instant, &asakusa)?;
//!
//! println!("{} ({}の刻)", edo.temporal.name(), edo.temporal.branch());
//! println!("{} / {}", edo.sekki.term.name(), edo.sekki.micro_season.name());
//! if let Ok(day) = &edo.lunar {
//!     println!("{} {}", day.lunar, day.rokuyo);
//! }
//! # Ok::<(), edo_time::Error>(())
//! ```
//!
//! ### Temporal hours only
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use edo_time::temporal::{Period, koku_schedule};
//!
//! let dawn = "2026-06-20T18:47:00Z".parse::<DateTime<Utc>>().unwrap();
//! let dusk = "2026-06-21T10:38:00Z".parse::<DateTime<Utc>>().unwrap();
//!
//! for koku in koku_schedule(Period::Day, dawn, dusk) {
//!     println!("{} {} – {}", koku.name(), koku.start, koku.end);
//! }
//! ```
//!
//! ## Reference data
//!
//! The lunar calendar and rokuyo are culturally defined and are looked up, never computed. The
//! bundled tables cover 2026 through 2028 (lunar calendar) and 2025 through 2030 (new moons).
//! Outside that span the affected fields of [`EdoTimeData`] carry an error while the
//! astronomical fields stay available. Build [`ReferenceData`] from your own datasets with
//! [`ReferenceData::from_sources`] to extend coverage.
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd ed. Willmann-Bell. Chapter 25.
//! - 国立天文台 暦計算室. 暦象年表.

#![deny(missing_docs)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::clock::{EdoClock, EdoTimeData};
pub use crate::config::EdoConfig;
pub use crate::data::ReferenceData;
pub use crate::error::{Error, Result};
pub use crate::types::{EventPair, Geometry, Horizon, Location};

// Computation modules
pub mod lunar;
pub mod moon;
pub mod noon;
pub mod sekki;
pub mod solar;
pub mod temporal;
pub mod twilight;

// Core modules
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod types;
pub mod zone;

// Internal modules
mod math;

// Public modules
pub mod time;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use zone::FixedOffsetResolver;

    fn clock(data: &ReferenceData) -> EdoClock<'_, FixedOffsetResolver> {
        let resolver = FixedOffsetResolver::new()
            .with_zone("Asia/Tokyo", 9 * 3600)
            .unwrap();
        EdoClock::new(resolver, data)
    }

    #[test]
    fn test_day_koku_longer_in_summer() {
        let data = ReferenceData::bundled().unwrap();
        let clock = clock(&data);
        let tokyo = Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap();

        let summer = clock
            .compute("2026-06-21T03:00:00Z".parse::<DateTime<Utc>>().unwrap(), &tokyo)
            .unwrap();
        let day = summer.day_schedule[0].duration();
        let night = summer.night_schedule[0].duration();
        assert!(day > night + Duration::minutes(30), "{day} vs {night}");

        let winter = clock
            .compute("2026-12-21T03:00:00Z".parse::<DateTime<Utc>>().unwrap(), &tokyo)
            .unwrap();
        let day = winter.day_schedule[0].duration();
        let night = winter.night_schedule[0].duration();
        assert!(day < night, "{day} vs {night}");
    }

    #[test]
    fn test_same_instant_same_result() {
        let data = ReferenceData::bundled().unwrap();
        let clock = clock(&data);
        let kyoto = Location::new(35.0116, 135.7681, "Asia/Tokyo").unwrap();
        let instant = "2027-03-03T21:15:00Z".parse::<DateTime<Utc>>().unwrap();

        let a = clock.compute(instant, &kyoto).unwrap();
        let b = clock.compute(instant, &kyoto).unwrap();
        assert_eq!(a, b);
    }
}
