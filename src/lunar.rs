//! Lunisolar calendar dates and rokuyo (六曜), looked up from a reference table.
//!
//! Neither value is derived astronomically here. A [`LunarCalendar`] is built once from a CSV
//! dataset with the columns
//!
//! ```text
//! date,<unused>,lunar_year,lunar_month,lunar_day,is_leap_month,<unused>,rokuyo
//! ```
//!
//! and answers exact-date queries. Dates outside the table, or in a gap inside it, are reported
//! as [`Error::NotFound`] with a reason that says which case applies.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::ops::Bound;

use chrono::NaiveDate;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::{Error, Result};

/// The six-day folk calendar cycle, in traditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rokuyo {
    /// 先勝: good in the morning
    Sensho,
    /// 友引: avoid funerals
    Tomobiki,
    /// 先負: good in the afternoon
    Senbu,
    /// 仏滅: inauspicious all day
    Butsumetsu,
    /// 大安: auspicious all day
    Taian,
    /// 赤口: only noon is auspicious
    Shakko,
}

/// Historical and variant spellings, checked after NFKC normalization.
const ROKUYO_ALIASES: &[(&str, Rokuyo)] = &[
    ("佛滅", Rokuyo::Butsumetsu),
    ("物滅", Rokuyo::Butsumetsu),
    ("虚亡", Rokuyo::Butsumetsu),
    ("空亡", Rokuyo::Butsumetsu),
    ("速喜", Rokuyo::Sensho),
    ("留連", Rokuyo::Tomobiki),
];

impl Rokuyo {
    /// All labels in cycle order.
    pub const ALL: [Self; 6] = [
        Self::Sensho,
        Self::Tomobiki,
        Self::Senbu,
        Self::Butsumetsu,
        Self::Taian,
        Self::Shakko,
    ];

    /// Canonical kanji label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sensho => "先勝",
            Self::Tomobiki => "友引",
            Self::Senbu => "先負",
            Self::Butsumetsu => "仏滅",
            Self::Taian => "大安",
            Self::Shakko => "赤口",
        }
    }

    /// Kana reading.
    #[must_use]
    pub const fn reading(&self) -> &'static str {
        match self {
            Self::Sensho => "せんしょう",
            Self::Tomobiki => "ともびき",
            Self::Senbu => "せんぶ",
            Self::Butsumetsu => "ぶつめつ",
            Self::Taian => "たいあん",
            Self::Shakko => "しゃっこう",
        }
    }

    /// Traditional reading of the day's fortune.
    #[must_use]
    pub const fn fortune(&self) -> &'static str {
        match self {
            Self::Sensho => "午前は吉、午後は凶",
            Self::Tomobiki => "朝夕は吉、昼は凶。葬儀を避ける",
            Self::Senbu => "午前は凶、午後は吉",
            Self::Butsumetsu => "終日凶",
            Self::Taian => "終日吉",
            Self::Shakko => "正午のみ吉",
        }
    }

    /// Parses a label, accepting compatibility forms.
    ///
    /// The input is NFKC-normalized and trimmed first, so full-width spaces and CJK
    /// compatibility ideographs map to their canonical characters. Historical spellings such as
    /// 佛滅 map to the modern label.
    ///
    /// # Example
    /// ```
    /// use edo_time::lunar::Rokuyo;
    ///
    /// assert_eq!(Rokuyo::parse("大安"), Some(Rokuyo::Taian));
    /// assert_eq!(Rokuyo::parse("佛滅"), Some(Rokuyo::Butsumetsu));
    /// assert_eq!(Rokuyo::parse("\u{3000}友引 "), Some(Rokuyo::Tomobiki));
    /// assert_eq!(Rokuyo::parse("吉日"), None);
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label.nfkc().collect();
        let normalized = normalized.trim();
        Self::ALL
            .into_iter()
            .find(|rokuyo| rokuyo.name() == normalized)
            .or_else(|| {
                ROKUYO_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|&(_, rokuyo)| rokuyo)
            })
    }

    /// The rokuyo conventionally assigned to a lunar month and day: `(month + day) mod 6`,
    /// where 0 is 大安 and the cycle continues 赤口, 先勝, 友引, 先負, 仏滅.
    ///
    /// Only used to cross-check a loaded table (see [`LunarCalendar::rokuyo_mismatches`]).
    /// Lookups always return the tabulated label and never fill gaps from this rule.
    #[must_use]
    pub const fn from_lunar_date(month: u8, day: u8) -> Self {
        match (month as u16 + day as u16) % 6 {
            0 => Self::Taian,
            1 => Self::Shakko,
            2 => Self::Sensho,
            3 => Self::Tomobiki,
            4 => Self::Senbu,
            _ => Self::Butsumetsu,
        }
    }
}

impl fmt::Display for Rokuyo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const MONTH_NAMES: [&str; 12] = [
    "睦月", "如月", "弥生", "卯月", "皐月", "水無月", "文月", "葉月", "長月", "神無月", "霜月",
    "師走",
];

/// A date in the traditional lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    year: i32,
    month: u8,
    day: u8,
    is_leap_month: bool,
}

impl LunarDate {
    /// Creates a lunar date.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the month is outside 1..=12 or the day outside 1..=30.
    pub const fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Result<Self> {
        if month < 1 || month > 12 {
            return Err(Error::invalid_datetime("lunar month must be between 1 and 12"));
        }
        if day < 1 || day > 30 {
            return Err(Error::invalid_datetime("lunar day must be between 1 and 30"));
        }
        Ok(Self {
            year,
            month,
            day,
            is_leap_month,
        })
    }

    /// Lunar year (the Gregorian year in which its first month began).
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month, 1..=30.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Whether this is an intercalary (閏) month.
    #[must_use]
    pub const fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }

    /// Traditional month name, e.g. 睦月 for month 1.
    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leap_month {
            f.write_str("閏")?;
        }
        write!(f, "{}月{}日", self.month, self.day)
    }
}

/// One row of the lunar calendar: a civil date with its lunar date and rokuyo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarDay {
    /// Civil calendar date
    pub date: NaiveDate,
    /// Lunar date on that civil date
    pub lunar: LunarDate,
    /// Rokuyo label on that civil date
    pub rokuyo: Rokuyo,
}

/// Immutable date-keyed lunar calendar table.
#[derive(Debug, Clone)]
pub struct LunarCalendar {
    entries: BTreeMap<NaiveDate, LunarDay>,
}

const DATE_COLUMN: usize = 0;
const YEAR_COLUMN: usize = 2;
const MONTH_COLUMN: usize = 3;
const DAY_COLUMN: usize = 4;
const LEAP_COLUMN: usize = 5;
const ROKUYO_COLUMN: usize = 7;

fn field<'r>(record: &'r csv::StringRecord, index: usize, line: u64) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| Error::dataset(line, format!("missing column {}", index + 1)))
}

fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

fn parse_record(record: &csv::StringRecord, line: u64) -> Result<LunarDay> {
    let date_text = field(record, DATE_COLUMN, line)?;
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|e| Error::dataset(line, format!("bad date '{date_text}': {e}")))?;

    let year_text = field(record, YEAR_COLUMN, line)?;
    let year = year_text
        .parse::<i32>()
        .map_err(|_| Error::dataset(line, format!("bad lunar year '{year_text}'")))?;
    let month_text = field(record, MONTH_COLUMN, line)?;
    let month = month_text
        .parse::<u8>()
        .map_err(|_| Error::dataset(line, format!("bad lunar month '{month_text}'")))?;
    let day_text = field(record, DAY_COLUMN, line)?;
    let day = day_text
        .parse::<u8>()
        .map_err(|_| Error::dataset(line, format!("bad lunar day '{day_text}'")))?;
    let leap_text = field(record, LEAP_COLUMN, line)?;
    let is_leap_month = parse_bool(leap_text)
        .ok_or_else(|| Error::dataset(line, format!("bad leap-month flag '{leap_text}'")))?;

    let lunar = LunarDate::new(year, month, day, is_leap_month)
        .map_err(|e| Error::dataset(line, e.to_string()))?;

    let rokuyo_text = field(record, ROKUYO_COLUMN, line)?;
    let rokuyo = Rokuyo::parse(rokuyo_text)
        .ok_or_else(|| Error::dataset(line, format!("unknown rokuyo '{rokuyo_text}'")))?;

    Ok(LunarDay {
        date,
        lunar,
        rokuyo,
    })
}

impl LunarCalendar {
    /// Builds a calendar from already-parsed rows.
    ///
    /// # Errors
    /// Returns `Dataset` if `days` is empty or contains the same civil date twice.
    pub fn from_days(days: impl IntoIterator<Item = LunarDay>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (index, day) in days.into_iter().enumerate() {
            if entries.insert(day.date, day).is_some() {
                return Err(Error::dataset(
                    index as u64 + 1,
                    format!("duplicate date {}", day.date),
                ));
            }
        }
        let calendar = Self { entries };
        let (first, last) = calendar
            .coverage()
            .ok_or_else(|| Error::dataset(0, "lunar calendar has no rows"))?;
        tracing::debug!(
            rows = calendar.len(),
            %first,
            %last,
            gaps = calendar.gap_count(),
            "lunar calendar loaded"
        );
        let mismatches = calendar.rokuyo_mismatches();
        if mismatches > 0 {
            tracing::warn!(
                mismatches,
                "rokuyo labels off the lunar-date cycle, keeping the table's"
            );
        }
        Ok(calendar)
    }

    /// Parses a CSV dataset with a header row.
    ///
    /// # Errors
    /// Returns `Dataset` naming the offending record for malformed rows, unknown rokuyo labels,
    /// duplicate dates, or an empty table.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut days = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let line = index as u64 + 1;
            let record = record.map_err(|e| Error::dataset(line, e.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            days.push(parse_record(&record, line)?);
        }
        Self::from_days(days)
    }

    /// Parses a CSV dataset held in memory.
    ///
    /// # Errors
    /// See [`LunarCalendar::from_csv_reader`].
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_csv_reader(data.as_bytes())
    }

    /// Looks up a civil date.
    ///
    /// # Errors
    /// Returns `NotFound` with a reason of "before", "after" or "gap" for dates the table does
    /// not cover.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use edo_time::lunar::{LunarCalendar, Rokuyo};
    ///
    /// let calendar = LunarCalendar::from_csv_str(
    ///     "date,weekday,lunar_year,lunar_month,lunar_day,is_leap_month,kanshi,rokuyo\n\
    ///      2026-02-17,火,2026,1,1,false,癸卯,先勝\n",
    /// ).unwrap();
    ///
    /// let day = calendar.lookup(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()).unwrap();
    /// assert_eq!(day.lunar.month_name(), "睦月");
    /// assert_eq!(day.rokuyo, Rokuyo::Sensho);
    /// assert!(calendar.lookup(NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()).is_err());
    /// ```
    pub fn lookup(&self, date: NaiveDate) -> Result<LunarDay> {
        if let Some(day) = self.entries.get(&date) {
            return Ok(*day);
        }
        let reason = match self.coverage() {
            None => "lunar calendar is empty".to_string(),
            Some((first, _)) if date < first => {
                format!("before the first tabulated date {first}")
            }
            Some((_, last)) if date > last => format!("after the last tabulated date {last}"),
            Some(_) => {
                let previous = self.entries.range(..date).next_back().map(|(d, _)| *d);
                let next = self
                    .entries
                    .range((Bound::Excluded(date), Bound::Unbounded))
                    .next()
                    .map(|(d, _)| *d);
                match (previous, next) {
                    (Some(previous), Some(next)) => {
                        format!("gap in the table between {previous} and {next}")
                    }
                    _ => "gap in the table".to_string(),
                }
            }
        };
        Err(Error::not_found(date, reason))
    }

    /// First and last tabulated dates.
    #[must_use]
    pub fn coverage(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.keys().next()?;
        let last = self.entries.keys().next_back()?;
        Some((*first, *last))
    }

    /// Number of tabulated dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of missing days between the first and last tabulated dates.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.coverage().map_or(0, |(first, last)| {
            let span = (last - first).num_days() as usize + 1;
            span - self.entries.len()
        })
    }

    /// Number of rows whose rokuyo differs from [`Rokuyo::from_lunar_date`].
    #[must_use]
    pub fn rokuyo_mismatches(&self) -> usize {
        self.entries
            .values()
            .filter(|day| {
                day.rokuyo != Rokuyo::from_lunar_date(day.lunar.month(), day.lunar.day())
            })
            .count()
    }

    /// Iterates over all rows in date order.
    pub fn iter(&self) -> impl Iterator<Item = &LunarDay> {
        self.entries.values()
    }
}
