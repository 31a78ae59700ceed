//! Civil time handling through the IANA database.
#![cfg(feature = "tz")]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use edo_time::zone::{FixedOffsetResolver, MeridianSource, TimeZoneResolver, TzResolver};
use edo_time::temporal::Period;
use edo_time::{EdoClock, EdoConfig, Error, Location, ReferenceData};
use std::sync::OnceLock;

fn data() -> &'static ReferenceData {
    static DATA: OnceLock<ReferenceData> = OnceLock::new();
    DATA.get_or_init(|| ReferenceData::bundled().unwrap())
}

fn utc(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_every_iana_zone_resolves_local_noon() {
    let resolver = TzResolver;
    for tz in chrono_tz::TZ_VARIANTS {
        let zone = tz.name();
        for day in [date(2026, 1, 15), date(2026, 7, 15)] {
            let noon = resolver.noon_instant(day, zone).unwrap();
            assert_eq!(resolver.calendar_date(noon, zone).unwrap(), day, "{zone}");

            let dst = resolver.dst_offset(zone, noon);
            assert!(dst.num_hours().abs() <= 2, "{zone}: {dst}");
            assert!(resolver.standard_offset(zone, noon).is_some(), "{zone}");
        }
    }
}

#[test]
fn test_london_summer_noon_corrects_for_daylight_saving() {
    let clock = EdoClock::new(TzResolver, data());
    let greenwich = Location::new(51.4769, 0.0, "Europe/London").unwrap();

    let (noon, _) = clock.sun_events(date(2026, 6, 21), &greenwich).unwrap();
    assert_eq!(noon.civil_noon, utc("2026-06-21T11:00:00Z"));
    assert_eq!(noon.daylight_saving, 60.0);
    assert!(
        utc("2026-06-21T12:00:00Z") < noon.solar_noon && noon.solar_noon < utc("2026-06-21T12:04:00Z"),
        "{}",
        noon.solar_noon
    );

    let (winter, _) = clock.sun_events(date(2026, 12, 21), &greenwich).unwrap();
    assert_eq!(winter.daylight_saving, 0.0);
    // the sun runs about two minutes fast at the December solstice
    assert!(
        utc("2026-12-21T11:55:00Z") < winter.solar_noon && winter.solar_noon < utc("2026-12-21T12:00:00Z"),
        "{}",
        winter.solar_noon
    );
}

#[test]
fn test_new_york_summer_noon() {
    let clock = EdoClock::new(TzResolver, data());
    let manhattan = Location::new(40.7128, -74.0060, "America/New_York").unwrap();

    let (noon, sun) = clock.sun_events(date(2026, 7, 1), &manhattan).unwrap();
    assert_eq!(noon.standard_meridian, -75.0);
    assert_eq!(noon.meridian_source, MeridianSource::Table);
    // about 12:59 EDT
    assert!(
        utc("2026-07-01T16:57:00Z") < sun.transit && sun.transit < utc("2026-07-01T17:02:00Z"),
        "{}",
        sun.transit
    );
}

#[test]
fn test_southern_daylight_saving() {
    let clock = EdoClock::new(TzResolver, data());
    let sydney = Location::new(-33.8688, 151.2093, "Australia/Sydney").unwrap();

    let (summer, _) = clock.sun_events(date(2026, 1, 15), &sydney).unwrap();
    assert_eq!(summer.daylight_saving, 60.0);
    let (winter, _) = clock.sun_events(date(2026, 7, 15), &sydney).unwrap();
    assert_eq!(winter.daylight_saving, 0.0);

    // solar noon stays near 12:00 standard time either way
    let summer_local = summer.solar_noon - summer.civil_noon - Duration::hours(1);
    let winter_local = winter.solar_noon - winter.civil_noon;
    assert!(summer_local.num_minutes().abs() < 15, "{summer_local}");
    assert!(winter_local.num_minutes().abs() < 15, "{winter_local}");
}

#[test]
fn test_meridian_from_offset() {
    let clock = EdoClock::new(TzResolver, data());
    let kathmandu = Location::new(27.7172, 85.3240, "Asia/Kathmandu").unwrap();

    let (noon, _) = clock.sun_events(date(2026, 4, 1), &kathmandu).unwrap();
    assert_eq!(noon.standard_meridian, 86.25);
    assert_eq!(noon.meridian_source, MeridianSource::Offset);
}

#[test]
fn test_highland_midsummer_night_before_late_dusk() {
    let clock = EdoClock::new(TzResolver, data());
    let ullapool = Location::new(57.895, -5.16, "Europe/London").unwrap();
    // 00:05 BST, a few minutes before the sun reaches −7°21′40″
    let instant = utc("2026-06-20T23:05:00Z");

    let edo = clock.compute(instant, &ullapool).unwrap();
    assert_eq!(edo.civil_date, date(2026, 6, 21));
    assert!(edo.temporal.contains(instant), "{:?}", edo.temporal);
    assert_eq!(edo.temporal.period, Period::Day);
    assert_eq!(edo.temporal.koku, 6);
    assert_eq!(edo.noon.solar_noon.date_naive(), date(2026, 6, 20));
    assert!(edo.sun.dusk() > instant);
}

#[test]
fn test_kiritimati_noon_is_daytime() {
    let clock = EdoClock::new(TzResolver, data());
    let kiritimati = Location::new(1.87, -157.43, "Pacific/Kiritimati").unwrap();

    let (noon, sun) = clock.sun_events(date(2026, 3, 20), &kiritimati).unwrap();
    assert_eq!(noon.standard_meridian, 210.0);
    assert_eq!(noon.meridian_source, MeridianSource::Offset);
    let late = noon.solar_noon - noon.civil_noon;
    assert!(late > Duration::minutes(30) && late < Duration::minutes(45), "{late}");

    let edo = clock.compute(noon.civil_noon, &kiritimati).unwrap();
    assert_eq!(edo.civil_date, date(2026, 3, 20));
    assert!(edo.is_daytime());
    assert!(edo.temporal.contains(noon.civil_noon));
    assert_eq!(edo.temporal.koku, 3);
    assert_eq!(edo.sun, sun);
}

#[test]
fn test_chatham_islands_on_the_auckland_meridian() {
    let clock = EdoClock::new(TzResolver, data());
    // Waitangi, 3.45° past the date line from Auckland's 180°
    let waitangi = Location::new(-43.95, -176.56, "Pacific/Auckland").unwrap();

    let (noon, sun) = clock.sun_events(date(2026, 3, 20), &waitangi).unwrap();
    assert_eq!(noon.standard_meridian, 180.0);
    assert!((noon.longitude_correction + 13.76).abs() < 0.01, "{}", noon.longitude_correction);
    // about 12:54 NZDT
    assert!(
        utc("2026-03-19T23:48:00Z") < sun.transit && sun.transit < utc("2026-03-20T00:00:00Z"),
        "{}",
        sun.transit
    );

    let edo = clock.compute(sun.transit, &waitangi).unwrap();
    assert_eq!(edo.temporal.koku, 4);
}

#[test]
fn test_configured_meridian_across_the_date_line() {
    let mut config = EdoConfig::default();
    config.meridians.insert("Pacific/Chatham".to_owned(), 180.0);
    let clock = EdoClock::with_config(TzResolver, data(), config).unwrap();
    let waitangi = Location::new(-43.95, -176.56, "Pacific/Chatham").unwrap();

    let (noon, _) = clock.sun_events(date(2026, 3, 20), &waitangi).unwrap();
    assert_eq!(noon.standard_meridian, 180.0);
    assert_eq!(noon.meridian_source, MeridianSource::Configured);
    assert!(noon.longitude_correction.abs() < 15.0, "{}", noon.longitude_correction);
    assert!((noon.solar_noon - noon.civil_noon).num_hours().abs() < 2);
}

#[test]
fn test_tokyo_matches_fixed_offset() {
    let fixed = FixedOffsetResolver::new()
        .with_zone("Asia/Tokyo", 9 * 3600)
        .unwrap();
    let by_offset = EdoClock::new(fixed, data());
    let by_database = EdoClock::new(TzResolver, data());
    let tokyo = Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap();

    let start = utc("2026-01-01T00:00:00Z");
    let end = utc("2026-01-03T00:00:00Z");
    let step = Duration::minutes(45);
    assert_eq!(
        by_offset.series(&tokyo, start, end, step).unwrap(),
        by_database.series(&tokyo, start, end, step).unwrap()
    );
}

#[test]
fn test_unknown_zone() {
    let clock = EdoClock::new(TzResolver, data());
    let nowhere = Location::new(35.0, 135.0, "Asia/Edo").unwrap();
    assert_eq!(
        clock.compute(utc("2026-06-21T00:00:00Z"), &nowhere).unwrap_err(),
        Error::unknown_time_zone("Asia/Edo")
    );
}
