//! The aggregate computation: one instant and location in, one [`EdoTimeData`] out.
//!
//! Astronomical fields are total once the inputs validate. The two table-backed fields
//! (lunar date with rokuyo, and moon age) carry their own `Result` so a caller can render
//! everything else when a table does not cover the date.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::EdoConfig;
use crate::data::ReferenceData;
use crate::lunar::LunarDay;
use crate::moon::MoonAge;
use crate::noon::{SolarNoon, solar_noon};
use crate::sekki::{Sekki, classify};
use crate::solar::{SolarCoordinates, solar_coordinates};
use crate::temporal::{Period, TemporalTime, koku_schedule, night_bounds, temporal_time};
use crate::twilight::{SunEvents, sun_events};
use crate::types::Location;
use crate::zone::{MeridianTable, TimeZoneResolver};
use crate::{Error, Result};

/// Everything known about one instant at one location.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EdoTimeData {
    /// The instant the observation was made for
    pub instant: DateTime<Utc>,
    /// The observer
    pub location: Location,
    /// Civil calendar date of `instant` in the location's zone
    pub civil_date: NaiveDate,
    /// Solar coordinates at `instant`
    pub solar: SolarCoordinates,
    /// Solar transit of the solar day `temporal` belongs to, normally the civil date's
    pub noon: SolarNoon,
    /// Sunrise, sunset, dawn and dusk of that same solar day
    pub sun: SunEvents,
    /// The koku containing `instant`
    pub temporal: TemporalTime,
    /// Fraction of the current koku elapsed, [0, 1]
    pub koku_progress: f64,
    /// The six day koku between `sun.dawn()` and `sun.dusk()`
    pub day_schedule: [TemporalTime; 6],
    /// The six koku of the night adjoining `instant`: the previous night before dawn, the
    /// coming night otherwise
    pub night_schedule: [TemporalTime; 6],
    /// Solar term and micro-season at `instant`
    pub sekki: Sekki,
    /// Lunar date and rokuyo of the civil date
    #[serde(serialize_with = "serialize_table_field")]
    pub lunar: Result<LunarDay>,
    /// Moon age at `instant`
    #[serde(serialize_with = "serialize_table_field")]
    pub moon: Result<MoonAge>,
}

impl EdoTimeData {
    /// Whether the current koku belongs to the day period.
    #[must_use]
    pub fn is_daytime(&self) -> bool {
        self.temporal.period == Period::Day
    }
}

/// Serializes a table-backed field as its value, or as `{"error": reason}`.
fn serialize_table_field<T: Serialize, S: Serializer>(
    field: &Result<T>,
    serializer: S,
) -> core::result::Result<S::Ok, S::Error> {
    match field {
        Ok(value) => value.serialize(serializer),
        Err(error) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("error", &error.reason())?;
            map.end()
        }
    }
}

/// The solar day an instant falls in, with the night bounds around it.
struct SolarDay {
    noon: SolarNoon,
    sun: SunEvents,
    temporal: TemporalTime,
    night: (DateTime<Utc>, DateTime<Utc>),
}

impl SolarDay {
    fn new(
        noon: SolarNoon,
        sun: SunEvents,
        instant: DateTime<Utc>,
        previous_dusk: Option<DateTime<Utc>>,
    ) -> Self {
        let (dawn, dusk) = (sun.dawn(), sun.dusk());
        Self {
            noon,
            sun,
            temporal: temporal_time(dawn, dusk, instant, previous_dusk),
            night: night_bounds(dawn, dusk, instant, previous_dusk),
        }
    }
}

/// Computes [`EdoTimeData`] with a resolver, calibration and reference tables.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use edo_time::{EdoClock, Location, ReferenceData};
/// use edo_time::zone::FixedOffsetResolver;
///
/// let data = ReferenceData::bundled().unwrap();
/// let resolver = FixedOffsetResolver::new().with_zone("Asia/Tokyo", 9 * 3600).unwrap();
/// let clock = EdoClock::new(resolver, &data);
///
/// let tokyo = Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap();
/// let noon = "2026-05-10T03:00:00Z".parse::<DateTime<Utc>>().unwrap();
/// let edo = clock.compute(noon, &tokyo).unwrap();
///
/// assert!(edo.is_daytime());
/// assert_eq!(edo.sekki.term.name(), "立夏");
/// assert!(edo.lunar.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EdoClock<'d, R> {
    resolver: R,
    data: &'d ReferenceData,
    config: EdoConfig,
    meridians: MeridianTable,
}

impl<'d, R: TimeZoneResolver> EdoClock<'d, R> {
    /// Creates a clock with the default calibration.
    pub fn new(resolver: R, data: &'d ReferenceData) -> Self {
        Self::from_parts(resolver, data, EdoConfig::default())
    }

    /// Creates a clock with an explicit calibration.
    ///
    /// # Errors
    /// Returns `InvalidAltitude` or `InvalidLongitude` for an out-of-range calibration.
    pub fn with_config(resolver: R, data: &'d ReferenceData, config: EdoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(resolver, data, config))
    }

    fn from_parts(resolver: R, data: &'d ReferenceData, config: EdoConfig) -> Self {
        let meridians = config.meridian_table();
        Self {
            resolver,
            data,
            config,
            meridians,
        }
    }

    /// The calibration in use.
    pub const fn config(&self) -> &EdoConfig {
        &self.config
    }

    /// The reference tables in use.
    pub const fn data(&self) -> &'d ReferenceData {
        self.data
    }

    /// Solar noon and sun events for a civil date.
    ///
    /// # Errors
    /// Propagates resolver errors.
    pub fn sun_events(&self, date: NaiveDate, location: &Location) -> Result<(SolarNoon, SunEvents)> {
        let noon = solar_noon(
            &self.resolver,
            &self.meridians,
            self.config.equation_of_time_sign,
            date,
            location,
        )?;
        let events = sun_events(
            &noon,
            location,
            self.config.sunrise_sunset_horizon(),
            self.config.dawn_dusk_horizon(),
        );
        Ok((noon, events))
    }

    /// Computes every observation for `instant` at `location`.
    ///
    /// # Errors
    /// Returns `UnknownTimeZone` or `InvalidDateTime` from the resolver. Lunar and moon-age
    /// lookups never fail the whole computation; their errors are carried in
    /// [`EdoTimeData::lunar`] and [`EdoTimeData::moon`].
    pub fn compute(&self, instant: DateTime<Utc>, location: &Location) -> Result<EdoTimeData> {
        let civil_date = self.resolver.calendar_date(instant, location.zone())?;
        let SolarDay {
            noon,
            sun,
            temporal,
            night: (night_start, night_end),
        } = self.solar_day(instant, civil_date, location)?;
        let (dawn, dusk) = (sun.dawn(), sun.dusk());

        let solar = solar_coordinates(&instant);
        let sekki = classify(solar.longitude());

        let lunar = self.data.lunar().lookup(civil_date);
        if let Err(error) = &lunar {
            tracing::debug!(%civil_date, %error, "lunar date unavailable");
        }
        let moon = self.data.new_moons().moon_age(instant);
        if let Err(error) = &moon {
            tracing::debug!(%instant, %error, "moon age unavailable");
        }

        tracing::debug!(
            %instant,
            zone = location.zone(),
            period = ?temporal.period,
            koku = temporal.koku,
            term = sekki.term.name(),
            "computed edo time"
        );

        Ok(EdoTimeData {
            instant,
            location: location.clone(),
            civil_date,
            solar,
            noon,
            sun,
            temporal,
            koku_progress: temporal.progress(instant),
            day_schedule: koku_schedule(Period::Day, dawn, dusk),
            night_schedule: koku_schedule(Period::Night, night_start, night_end),
            sekki,
            lunar,
            moon,
        })
    }

    /// Finds the solar day whose koku contain `instant`.
    ///
    /// Normally that is the civil date's own. Far enough west of the zone's meridian in summer a
    /// dusk can fall after civil midnight, so an instant before dawn may still belong to the
    /// previous day's sixth day koku. Near polar day the following dawn can come before civil
    /// midnight, and the instant then opens the next day instead.
    fn solar_day(
        &self,
        instant: DateTime<Utc>,
        civil_date: NaiveDate,
        location: &Location,
    ) -> Result<SolarDay> {
        let (noon, sun) = self.sun_events(civil_date, location)?;
        let (dawn, dusk) = (sun.dawn(), sun.dusk());

        if instant < dawn {
            let previous_date = civil_date
                .pred_opt()
                .ok_or_else(|| Error::invalid_datetime("no civil date before this one"))?;
            let (previous_noon, previous) = self.sun_events(previous_date, location)?;
            if instant < previous.dusk() {
                tracing::debug!(%instant, %previous_date, "instant precedes the previous dusk");
                return Ok(SolarDay::new(previous_noon, previous, instant, None));
            }
            return Ok(SolarDay::new(noon, sun, instant, Some(previous.dusk())));
        }

        if instant >= dusk {
            let (_, night_end) = night_bounds(dawn, dusk, instant, None);
            if instant >= night_end {
                let next_date = civil_date
                    .succ_opt()
                    .ok_or_else(|| Error::invalid_datetime("no civil date after this one"))?;
                let (next_noon, next) = self.sun_events(next_date, location)?;
                if instant >= next.dawn() {
                    tracing::debug!(%instant, %next_date, "instant follows the next dawn");
                    return Ok(SolarDay::new(next_noon, next, instant, Some(dusk)));
                }
                // the night runs on to the next dawn
                return Ok(SolarDay {
                    noon,
                    sun,
                    temporal: temporal_time(next.dawn(), next.dusk(), instant, Some(dusk)),
                    night: (dusk, next.dawn()),
                });
            }
        }

        Ok(SolarDay::new(noon, sun, instant, None))
    }

    /// Computes observations for the current system time.
    ///
    /// # Errors
    /// See [`EdoClock::compute`].
    pub fn now(&self, location: &Location) -> Result<EdoTimeData> {
        self.compute(Utc::now(), location)
    }

    /// Computes observations at a fixed step across `[start, end)`.
    ///
    /// # Errors
    /// Returns the first failing step, or `InvalidDateTime` for a non-positive step.
    pub fn series(
        &self,
        location: &Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Vec<EdoTimeData>> {
        if step <= Duration::zero() {
            return Err(Error::invalid_datetime("series step must be positive"));
        }
        let mut out = Vec::new();
        let mut instant = start;
        while instant < end {
            out.push(self.compute(instant, location)?);
            instant += step;
        }
        Ok(out)
    }
}
