//! Temporal hours (不定時法).
//!
//! The day period runs from dawn to dusk and the night period from dusk to the next dawn. Each
//! is divided into six equal koku, so koku lengths change with the season and differ between
//! day and night. Koku 1 of the day starts at dawn (明け六つ), koku 1 of the night at dusk
//! (暮れ六つ).
//!
//! Interval boundaries are computed in whole milliseconds as `start + total·i/6`, which makes the
//! six intervals contiguous and their union exactly `[start, end)`.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Number of koku in each period.
pub const KOKU_PER_PERIOD: u8 = 6;

/// Bell count announced at the start of each koku, in order.
const BELLS: [u8; 6] = [6, 5, 4, 9, 8, 7];

const DAY_NAMES: [&str; 6] = ["明け六つ", "朝五つ", "昼四つ", "昼九つ", "昼八つ", "夕七つ"];
const NIGHT_NAMES: [&str; 6] = ["暮れ六つ", "宵五つ", "夜四つ", "夜九つ", "暁八つ", "暁七つ"];

const DAY_BRANCHES: [&str; 6] = ["卯", "辰", "巳", "午", "未", "申"];
const NIGHT_BRANCHES: [&str; 6] = ["酉", "戌", "亥", "子", "丑", "寅"];

/// Day or night half of the temporal-hour cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Dawn to dusk
    Day,
    /// Dusk to the next dawn
    Night,
}

impl Period {
    /// Japanese label (昼 or 夜).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Day => "昼",
            Self::Night => "夜",
        }
    }
}

/// One koku: its period, 1-based position within the period, and its interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalTime {
    /// Day or night
    pub period: Period,
    /// Position within the period, 1..=6
    pub koku: u8,
    /// Inclusive start of the koku
    pub start: DateTime<Utc>,
    /// Exclusive end of the koku
    pub end: DateTime<Utc>,
}

impl TemporalTime {
    fn index(&self) -> usize {
        usize::from(self.koku.clamp(1, KOKU_PER_PERIOD) - 1)
    }

    /// Traditional name, e.g. 明け六つ or 暁七つ.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.period {
            Period::Day => DAY_NAMES[self.index()],
            Period::Night => NIGHT_NAMES[self.index()],
        }
    }

    /// Bell count rung at the start of this koku.
    #[must_use]
    pub fn bell(&self) -> u8 {
        BELLS[self.index()]
    }

    /// Earthly branch of this koku, e.g. 午 for the koku starting at solar noon.
    #[must_use]
    pub fn branch(&self) -> &'static str {
        match self.period {
            Period::Day => DAY_BRANCHES[self.index()],
            Period::Night => NIGHT_BRANCHES[self.index()],
        }
    }

    /// Length of this koku.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Fraction of this koku elapsed at `instant`, clamped to [0, 1].
    #[must_use]
    pub fn progress(&self, instant: DateTime<Utc>) -> f64 {
        let total = self.duration().num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        let elapsed = (instant - self.start).num_milliseconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }
}

impl Serialize for TemporalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TemporalTime", 7)?;
        state.serialize_field("period", &self.period)?;
        state.serialize_field("koku", &self.koku)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("bell", &self.bell())?;
        state.serialize_field("branch", self.branch())?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}

fn boundary(start: DateTime<Utc>, total_ms: i64, index: u8) -> DateTime<Utc> {
    start + Duration::milliseconds(total_ms * i64::from(index) / i64::from(KOKU_PER_PERIOD))
}

fn koku_at(period: Period, start: DateTime<Utc>, end: DateTime<Utc>, koku: u8) -> TemporalTime {
    let total_ms = (end - start).num_milliseconds().max(0);
    TemporalTime {
        period,
        koku,
        start: boundary(start, total_ms, koku - 1),
        end: boundary(start, total_ms, koku),
    }
}

/// Divides `[start, end)` into the six koku of `period`.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use edo_time::temporal::{Period, koku_schedule};
///
/// let dawn = "2026-03-20T20:10:00Z".parse::<DateTime<Utc>>().unwrap();
/// let dusk = "2026-03-21T09:34:00Z".parse::<DateTime<Utc>>().unwrap();
/// let schedule = koku_schedule(Period::Day, dawn, dusk);
///
/// assert_eq!(schedule[0].start, dawn);
/// assert_eq!(schedule[5].end, dusk);
/// assert_eq!(schedule[3].name(), "昼九つ");
/// ```
#[must_use]
pub fn koku_schedule(period: Period, start: DateTime<Utc>, end: DateTime<Utc>) -> [TemporalTime; 6] {
    core::array::from_fn(|i| koku_at(period, start, end, i as u8 + 1))
}

/// Finds the koku of `period` containing `now` within `[start, end)`.
///
/// `now` before `start` maps to koku 1 and `now` at or after `end` to koku 6.
#[must_use]
pub fn koku_containing(
    period: Period,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TemporalTime {
    let total_ms = (end - start).num_milliseconds();
    let elapsed_ms = (now - start).num_milliseconds().max(0);
    let koku = if total_ms <= 0 {
        1
    } else {
        // largest k with boundary(k) <= now, matching the truncation in `boundary`
        let n = i64::from(KOKU_PER_PERIOD);
        let index = elapsed_ms.saturating_mul(n).saturating_add(n - 1) / total_ms;
        (index + 1).min(i64::from(KOKU_PER_PERIOD)) as u8
    };
    koku_at(period, start, end, koku)
}

/// The bounds of the night period that contains `now`.
///
/// Before dawn the night runs from `previous_dusk` to `dawn`. Without a previous dusk the night
/// is assumed to be as long as the remainder of a 24-hour cycle, which is also how the night
/// after `dusk` is bounded.
#[must_use]
pub fn night_bounds(
    dawn: DateTime<Utc>,
    dusk: DateTime<Utc>,
    now: DateTime<Utc>,
    previous_dusk: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let night_length = Duration::hours(24) - (dusk - dawn);
    if now < dawn {
        match previous_dusk {
            Some(previous) if previous < dawn => (previous, dawn),
            _ => (dawn - night_length, dawn),
        }
    } else {
        (dusk, dusk + night_length)
    }
}

/// Classifies `now` into its temporal hour.
///
/// `previous_dusk` is the dusk of the preceding civil day. It is only consulted when `now` is
/// before `dawn`, so that pre-dawn instants fall into the previous night's partition.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use edo_time::temporal::{Period, temporal_time};
///
/// let dawn = "2026-06-20T18:47:00Z".parse::<DateTime<Utc>>().unwrap();
/// let dusk = "2026-06-21T10:38:00Z".parse::<DateTime<Utc>>().unwrap();
///
/// let at_dawn = temporal_time(dawn, dusk, dawn, None);
/// assert_eq!(at_dawn.period, Period::Day);
/// assert_eq!(at_dawn.koku, 1);
/// assert_eq!(at_dawn.start, dawn);
/// ```
#[must_use]
pub fn temporal_time(
    dawn: DateTime<Utc>,
    dusk: DateTime<Utc>,
    now: DateTime<Utc>,
    previous_dusk: Option<DateTime<Utc>>,
) -> TemporalTime {
    if dawn <= now && now < dusk {
        return koku_containing(Period::Day, dawn, dusk, now);
    }
    let (start, end) = night_bounds(dawn, dusk, now, previous_dusk);
    koku_containing(Period::Night, start, end, now)
}
