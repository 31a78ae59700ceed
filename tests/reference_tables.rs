//! Lunar calendar and new-moon tables: fixtures and the bundled datasets.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use edo_time::lunar::{LunarCalendar, Rokuyo};
use edo_time::moon::NewMoonTable;
use edo_time::time::{SYNODIC_MONTH, as_days};
use edo_time::{Error, ReferenceData};
use std::error::Error as StdError;
use std::fs::File;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture_calendar() -> Result<LunarCalendar, Box<dyn StdError>> {
    let file = File::open("tests/data/lunar_fixture.csv")?;
    Ok(LunarCalendar::from_csv_reader(file)?)
}

fn fixture_new_moons() -> Result<NewMoonTable, Box<dyn StdError>> {
    let json = std::fs::read_to_string("tests/data/new_moons_fixture.json")?;
    Ok(NewMoonTable::from_json_str(&json)?)
}

#[test]
fn test_fixture_gap_is_reported() -> Result<(), Box<dyn StdError>> {
    let calendar = fixture_calendar()?;
    assert_eq!(calendar.len(), 6);
    assert_eq!(calendar.gap_count(), 1);

    let err = calendar.lookup(date(2026, 2, 18)).unwrap_err();
    match err {
        Error::NotFound { date: missing, reason } => {
            assert_eq!(missing, date(2026, 2, 18));
            assert!(reason.contains("gap"), "{reason}");
            assert!(reason.contains("2026-02-17") && reason.contains("2026-02-19"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_fixture_bounds() -> Result<(), Box<dyn StdError>> {
    let calendar = fixture_calendar()?;
    let (first, last) = calendar.coverage().unwrap();

    assert!(calendar.lookup(first).is_ok());
    assert!(calendar.lookup(last).is_ok());

    let before = calendar.lookup(first - Duration::days(1)).unwrap_err();
    assert!(before.reason().contains("before"));
    let after = calendar.lookup(last + Duration::days(1)).unwrap_err();
    assert!(after.reason().contains("after"));
    Ok(())
}

#[test]
fn test_fixture_compatibility_glyphs() -> Result<(), Box<dyn StdError>> {
    let calendar = fixture_calendar()?;
    // 佛滅 in the dataset
    assert_eq!(calendar.lookup(date(2026, 2, 20))?.rokuyo, Rokuyo::Butsumetsu);
    // trailing ideographic space
    assert_eq!(calendar.lookup(date(2026, 2, 19))?.rokuyo, Rokuyo::Senbu);
    Ok(())
}

#[test]
fn test_bundled_lunar_new_years() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    for (new_year, lunar_year) in [
        (date(2026, 2, 17), 2026),
        (date(2027, 2, 7), 2027),
        (date(2028, 1, 27), 2028),
    ] {
        let day = data.lunar().lookup(new_year)?;
        assert_eq!(day.lunar.year(), lunar_year);
        assert_eq!((day.lunar.month(), day.lunar.day()), (1, 1));
        assert!(!day.lunar.is_leap_month());
        assert_eq!(day.rokuyo, Rokuyo::Sensho);

        let eve = data.lunar().lookup(new_year - Duration::days(1))?;
        assert_eq!(eve.lunar.month(), 12);
        assert_eq!(eve.lunar.year(), lunar_year - 1);
    }
    Ok(())
}

#[test]
fn test_bundled_leap_month() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    let leap_days: Vec<_> = data
        .lunar()
        .iter()
        .filter(|day| day.lunar.is_leap_month())
        .collect();

    assert_eq!(leap_days.len(), 29);
    assert!(leap_days.iter().all(|day| day.lunar.month() == 5));
    assert_eq!(leap_days[0].date, date(2028, 6, 23));
    assert_eq!(leap_days[0].lunar.to_string(), "閏5月1日");
    Ok(())
}

#[test]
fn test_bundled_rokuyo_follows_lunar_date() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    for day in data.lunar().iter() {
        assert_eq!(
            day.rokuyo,
            Rokuyo::from_lunar_date(day.lunar.month(), day.lunar.day()),
            "{}",
            day.date
        );
    }
    assert_eq!(data.lunar().rokuyo_mismatches(), 0);
    Ok(())
}

#[test]
fn test_bundled_lunar_bounds() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    assert!(data.lunar().lookup(date(2026, 1, 1)).is_ok());
    assert!(data.lunar().lookup(date(2028, 12, 31)).is_ok());
    assert!(matches!(
        data.lunar().lookup(date(2025, 12, 31)),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        data.lunar().lookup(date(2029, 1, 1)),
        Err(Error::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_fixture_new_moons_sorted() -> Result<(), Box<dyn StdError>> {
    let table = fixture_new_moons()?;
    assert_eq!(table.len(), 6);
    assert_eq!(table.first(), "2026-01-18T19:52:06Z".parse::<DateTime<Utc>>()?);
    assert_eq!(table.last(), "2026-06-15T02:54:08Z".parse::<DateTime<Utc>>()?);

    let mut previous = table.first();
    let mut instant = previous;
    while instant <= table.last() {
        let age = table.moon_age(instant)?;
        assert!(age.new_moon >= previous);
        assert!((0.0..SYNODIC_MONTH).contains(&age.age));
        previous = age.new_moon;
        instant += Duration::hours(6);
    }
    Ok(())
}

#[test]
fn test_moon_age_zero_at_every_tabulated_new_moon() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    let moons = data.new_moons();
    let mut instant = moons.first();
    loop {
        let age = moons.moon_age(instant)?;
        assert_eq!(age.age, 0.0, "{instant}");
        assert_eq!(age.new_moon, instant);
        match moons.next_new_moon(instant) {
            Some(next) => instant = next,
            None => break,
        }
    }
    Ok(())
}

#[test]
fn test_bundled_new_moon_spacing() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    let moons = data.new_moons();
    let mut instant = moons.first();
    while let Some(next) = moons.next_new_moon(instant) {
        let spacing = as_days(next - instant);
        // the true lunation varies between roughly 29.27 and 29.83 days
        assert!((29.2..29.9).contains(&spacing), "{instant} → {next}: {spacing}");
        instant = next;
    }
    Ok(())
}

#[test]
fn test_bundled_moon_range() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    let (start, end) = data.new_moons().coverage();

    assert!(data.new_moons().moon_age(start).is_ok());
    assert!(data.new_moons().moon_age(end).is_ok());
    assert!(matches!(
        data.new_moons().moon_age(start - Duration::seconds(1)),
        Err(Error::DataRange { .. })
    ));
    assert!(matches!(
        data.new_moons().moon_age(end + Duration::seconds(1)),
        Err(Error::DataRange { .. })
    ));
    Ok(())
}

#[test]
fn test_full_moon_mid_lunation() -> Result<(), Box<dyn StdError>> {
    let data = ReferenceData::bundled()?;
    // 2026-03-03 total lunar eclipse
    let eclipse = "2026-03-03T11:33:00Z".parse::<DateTime<Utc>>()?;
    let moon = data.new_moons().moon_age(eclipse)?;
    assert_eq!(moon.phase().name(), "満月");
    assert!(moon.illumination() > 0.98);
    Ok(())
}
