//! How the length of a day koku and a night koku changes over a year in Edo.

use chrono::NaiveDate;
use edo_time::temporal::{Period, koku_schedule, night_bounds};
use edo_time::zone::TzResolver;
use edo_time::{EdoClock, Location, ReferenceData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = ReferenceData::bundled()?;
    let clock = EdoClock::new(TzResolver, &data);
    let edo = Location::new(35.6840, 139.7746, "Asia/Tokyo")?;

    println!("{:<12} {:>10} {:>10}  明け六つ  暮れ六つ", "date", "day koku", "night koku");
    for month in 1..=12 {
        let date = NaiveDate::from_ymd_opt(2026, month, 21).ok_or("invalid date")?;
        let (_, events) = clock.sun_events(date, &edo)?;
        let (dawn, dusk) = (events.dawn(), events.dusk());
        let (night_start, night_end) = night_bounds(dawn, dusk, dusk, None);

        let day_koku = koku_schedule(Period::Day, dawn, dusk)[0].duration();
        let night_koku = koku_schedule(Period::Night, night_start, night_end)[0].duration();

        let jst = chrono_tz::Asia::Tokyo;
        println!(
            "{:<12} {:>7} min {:>7} min  {}     {}",
            date,
            day_koku.num_minutes(),
            night_koku.num_minutes(),
            dawn.with_timezone(&jst).format("%H:%M"),
            dusk.with_timezone(&jst).format("%H:%M"),
        );
    }

    Ok(())
}
