//! Moon age (月齢) from a table of new-moon instants.
//!
//! The age is the time elapsed since the most recent tabulated new moon, reduced modulo the mean
//! synodic month. Queries before the first tabulated new moon, or more than one synodic month
//! after the last, fail with [`Error::DataRange`] rather than extrapolating.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::math::{PI, positive_modulo};
use crate::time::{SYNODIC_MONTH, as_days, days};
use crate::{Error, Result};

/// Named phase of the moon, by eighths of the synodic month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    /// 新月
    NewMoon,
    /// 三日月
    WaxingCrescent,
    /// 上弦
    FirstQuarter,
    /// 十三夜
    WaxingGibbous,
    /// 満月
    FullMoon,
    /// 寝待月
    WaningGibbous,
    /// 下弦
    LastQuarter,
    /// 有明月
    WaningCrescent,
}

impl MoonPhase {
    const ALL: [Self; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Phase whose octant is centred nearest to `age` days.
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        let octant = (positive_modulo(age, SYNODIC_MONTH) / SYNODIC_MONTH * 8.0).round() as usize;
        Self::ALL[octant % 8]
    }

    /// Japanese name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewMoon => "新月",
            Self::WaxingCrescent => "三日月",
            Self::FirstQuarter => "上弦",
            Self::WaxingGibbous => "十三夜",
            Self::FullMoon => "満月",
            Self::WaningGibbous => "寝待月",
            Self::LastQuarter => "下弦",
            Self::WaningCrescent => "有明月",
        }
    }

    /// English name.
    #[must_use]
    pub const fn english(&self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Moon age at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonAge {
    /// Age in days, [0, 29.530588)
    pub age: f64,
    /// The tabulated new moon the age is counted from
    pub new_moon: DateTime<Utc>,
}

impl MoonAge {
    /// Named phase for this age.
    #[must_use]
    pub fn phase(&self) -> MoonPhase {
        MoonPhase::from_age(self.age)
    }

    /// Approximate illuminated fraction of the disc, `½(1 − cos(2π·age/synodic))`.
    #[must_use]
    pub fn illumination(&self) -> f64 {
        0.5 * (1.0 - (2.0 * PI * self.age / SYNODIC_MONTH).cos())
    }
}

impl Serialize for MoonAge {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MoonAge", 4)?;
        state.serialize_field("age", &self.age)?;
        state.serialize_field("new_moon", &self.new_moon)?;
        state.serialize_field("phase", self.phase().name())?;
        state.serialize_field("illumination", &self.illumination())?;
        state.end()
    }
}

/// Sorted, immutable list of new-moon instants.
#[derive(Debug, Clone)]
pub struct NewMoonTable {
    instants: Vec<DateTime<Utc>>,
}

impl NewMoonTable {
    /// Builds a table from instants in any order.
    ///
    /// # Errors
    /// Returns `Dataset` if `instants` is empty.
    pub fn new(mut instants: Vec<DateTime<Utc>>) -> Result<Self> {
        if instants.is_empty() {
            return Err(Error::dataset(0, "new-moon table has no entries"));
        }
        if !instants.is_sorted() {
            tracing::debug!("new-moon instants were not in order, sorting");
            instants.sort_unstable();
        }
        instants.dedup();
        let table = Self { instants };
        tracing::debug!(
            entries = table.len(),
            first = %table.first(),
            last = %table.last(),
            "new-moon table loaded"
        );
        Ok(table)
    }

    /// Parses a JSON array of ISO-8601 UTC timestamps.
    ///
    /// # Errors
    /// Returns `Dataset` for malformed JSON (record 0) or an unparseable timestamp (its 1-based
    /// position in the array).
    pub fn from_json_str(data: &str) -> Result<Self> {
        let raw: Vec<String> =
            serde_json::from_str(data).map_err(|e| Error::dataset(0, e.to_string()))?;
        let instants = raw
            .iter()
            .enumerate()
            .map(|(index, text)| {
                DateTime::parse_from_rfc3339(text)
                    .map(|instant| instant.with_timezone(&Utc))
                    .map_err(|e| {
                        Error::dataset(index as u64 + 1, format!("bad instant '{text}': {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(instants)
    }

    /// Earliest tabulated new moon.
    #[must_use]
    pub fn first(&self) -> DateTime<Utc> {
        self.instants[0]
    }

    /// Latest tabulated new moon.
    #[must_use]
    pub fn last(&self) -> DateTime<Utc> {
        self.instants[self.instants.len() - 1]
    }

    /// Number of tabulated new moons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// Always `false`: an empty table cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// The range of instants for which [`NewMoonTable::moon_age`] succeeds.
    #[must_use]
    pub fn coverage(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.first(), self.last() + days(SYNODIC_MONTH))
    }

    /// Greatest tabulated new moon at or before `instant`.
    #[must_use]
    pub fn previous_new_moon(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let after = self.instants.partition_point(|new_moon| *new_moon <= instant);
        after.checked_sub(1).map(|index| self.instants[index])
    }

    /// Smallest tabulated new moon strictly after `instant`.
    #[must_use]
    pub fn next_new_moon(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let after = self.instants.partition_point(|new_moon| *new_moon <= instant);
        self.instants.get(after).copied()
    }

    /// Moon age at `instant`.
    ///
    /// # Errors
    /// Returns `DataRange` if `instant` is before the first tabulated new moon or more than one
    /// synodic month after the last.
    ///
    /// # Example
    /// ```
    /// use chrono::{DateTime, Duration, Utc};
    /// use edo_time::moon::NewMoonTable;
    ///
    /// let table = NewMoonTable::from_json_str(
    ///     r#"["2026-01-18T19:51:52Z", "2026-02-17T12:01:03Z"]"#,
    /// ).unwrap();
    /// let new_moon = "2026-02-17T12:01:03Z".parse::<DateTime<Utc>>().unwrap();
    ///
    /// assert_eq!(table.moon_age(new_moon).unwrap().age, 0.0);
    /// let week_later = table.moon_age(new_moon + Duration::days(7)).unwrap();
    /// assert!((week_later.age - 7.0).abs() < 1e-9);
    /// ```
    pub fn moon_age(&self, instant: DateTime<Utc>) -> Result<MoonAge> {
        let (start, end) = self.coverage();
        if instant < start {
            return Err(Error::data_range(format!(
                "{instant} is before the first tabulated new moon {start}"
            )));
        }
        if instant > end {
            return Err(Error::data_range(format!(
                "{instant} is more than one synodic month after the last tabulated new moon {}",
                self.last()
            )));
        }
        let new_moon = self
            .previous_new_moon(instant)
            .ok_or_else(|| Error::data_range("no tabulated new moon at or before the instant"))?;
        let age = positive_modulo(as_days(instant - new_moon), SYNODIC_MONTH);
        Ok(MoonAge { age, new_moon })
    }
}
