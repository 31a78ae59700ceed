//! Reference tables for the table-backed fields.
//!
//! [`ReferenceData`] owns the lunar calendar and the new-moon list. Build it once and share it
//! by reference; nothing in the crate keeps a global copy.

use crate::Result;
use crate::lunar::LunarCalendar;
use crate::moon::NewMoonTable;

/// Lunar calendar for 2026-01-01 through 2028-12-31, keyed by civil date in Japan.
pub const BUNDLED_LUNAR_CALENDAR: &str = include_str!("../data/lunar_calendar.csv");

/// New-moon instants from 2025 through 2030, as ISO-8601 UTC strings.
pub const BUNDLED_NEW_MOONS: &str = include_str!("../data/new_moons.json");

/// The immutable reference tables consulted by [`EdoClock`](crate::EdoClock).
#[derive(Debug, Clone)]
pub struct ReferenceData {
    lunar: LunarCalendar,
    new_moons: NewMoonTable,
}

impl ReferenceData {
    /// Wraps already-built tables, e.g. fixtures in tests.
    #[must_use]
    pub const fn new(lunar: LunarCalendar, new_moons: NewMoonTable) -> Self {
        Self { lunar, new_moons }
    }

    /// Parses the datasets embedded in the crate.
    ///
    /// # Errors
    /// Returns `Dataset` if an embedded dataset is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_sources(BUNDLED_LUNAR_CALENDAR, BUNDLED_NEW_MOONS)
    }

    /// Parses a lunar calendar CSV and a new-moon JSON array.
    ///
    /// # Errors
    /// Returns `Dataset` if either dataset is malformed.
    pub fn from_sources(lunar_csv: &str, new_moons_json: &str) -> Result<Self> {
        let lunar = LunarCalendar::from_csv_str(lunar_csv)?;
        let new_moons = NewMoonTable::from_json_str(new_moons_json)?;
        Ok(Self::new(lunar, new_moons))
    }

    /// The lunar calendar table.
    #[must_use]
    pub const fn lunar(&self) -> &LunarCalendar {
        &self.lunar
    }

    /// The new-moon table.
    #[must_use]
    pub const fn new_moons(&self) -> &NewMoonTable {
        &self.new_moons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bundled_coverage() {
        let data = ReferenceData::bundled().unwrap();
        assert_eq!(
            data.lunar().coverage(),
            Some((
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2028, 12, 31).unwrap()
            ))
        );
        assert_eq!(data.lunar().len(), 1096);
        assert_eq!(data.lunar().gap_count(), 0);
        assert!(data.new_moons().len() > 70);
    }
}
