//! Edo-period clock readings for one instant across several cities.

use chrono::{DateTime, Utc};
use edo_time::zone::TzResolver;
use edo_time::{EdoClock, Location, ReferenceData};

#[derive(Debug)]
struct City {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    zone: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cities = [
        City {
            name: "Edo (Nihonbashi)",
            latitude: 35.6840,
            longitude: 139.7746,
            zone: "Asia/Tokyo",
        },
        City {
            name: "Kyoto",
            latitude: 35.0116,
            longitude: 135.7681,
            zone: "Asia/Tokyo",
        },
        City {
            name: "Nagasaki",
            latitude: 32.7503,
            longitude: 129.8777,
            zone: "Asia/Tokyo",
        },
        City {
            name: "Sapporo",
            latitude: 43.0621,
            longitude: 141.3544,
            zone: "Asia/Tokyo",
        },
        City {
            name: "Honolulu",
            latitude: 21.3069,
            longitude: -157.8583,
            zone: "Pacific/Honolulu",
        },
    ];

    let data = ReferenceData::bundled()?;
    let clock = EdoClock::new(TzResolver, &data);
    let instant = "2026-07-07T11:30:00Z".parse::<DateTime<Utc>>()?;

    for city in &cities {
        let location = Location::new(city.latitude, city.longitude, city.zone)?;
        let edo = clock.compute(instant, &location)?;

        println!("=== {} ===", city.name);
        println!(
            "Coordinates: {:.2}°N, {:.2}°E ({})",
            city.latitude, city.longitude, city.zone
        );
        println!(
            "Koku:       {} ({}の刻), {:.0}% elapsed",
            edo.temporal.name(),
            edo.temporal.branch(),
            edo.koku_progress * 100.0
        );
        println!("Dawn/dusk:  {} / {}", edo.sun.dawn(), edo.sun.dusk());
        println!(
            "Sekki:      {} / {}",
            edo.sekki.term.name(),
            edo.sekki.micro_season.name()
        );
        match &edo.lunar {
            Ok(day) => println!("Lunar date: {} {}", day.lunar, day.rokuyo),
            Err(e) => println!("Lunar date: unavailable ({})", e.reason()),
        }
        match &edo.moon {
            Ok(moon) => println!("Moon age:   {:.1} ({})", moon.age, moon.phase().name()),
            Err(e) => println!("Moon age:   unavailable ({})", e.reason()),
        }
        println!();
    }

    Ok(())
}
