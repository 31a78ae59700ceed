use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use edo_time::zone::TzResolver;
use edo_time::{EdoClock, EdoConfig, EdoTimeData, Location, ReferenceData};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "edo-time",
    about = "Traditional Japanese time (koku, sekki, lunar date, moon age) for a place and instant"
)]
struct Cli {
    /// Latitude in degrees, positive north
    #[arg(long, default_value_t = 35.6762, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees, positive east
    #[arg(long, default_value_t = 139.6503, allow_hyphen_values = true)]
    lon: f64,
    /// IANA time zone identifier
    #[arg(long, default_value = "Asia/Tokyo")]
    tz: String,
    /// Instant to evaluate, RFC 3339 (defaults to now)
    #[arg(long)]
    at: Option<DateTime<Utc>>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Print the day and night koku schedules
    #[arg(long)]
    schedule: bool,
    /// TOML calibration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_text(edo: &EdoTimeData, zone: &chrono_tz::Tz, schedule: bool) {
    let local = |instant: DateTime<Utc>| instant.with_timezone(zone).format("%H:%M");

    println!(
        "{}  ({}, {:.4}°, {:.4}°)",
        edo.instant.with_timezone(zone).format("%Y-%m-%d %H:%M:%S %Z"),
        edo.location.zone(),
        edo.location.latitude(),
        edo.location.longitude()
    );
    println!(
        "刻: {}{} {} ({}の刻, 鐘{}つ) {}–{}  {:.0}%",
        edo.temporal.period.label(),
        edo.temporal.koku,
        edo.temporal.name(),
        edo.temporal.branch(),
        edo.temporal.bell(),
        local(edo.temporal.start),
        local(edo.temporal.end),
        edo.koku_progress * 100.0
    );
    println!(
        "明け六つ {}  日の出 {}  南中 {}  日の入 {}  暮れ六つ {}{}",
        local(edo.sun.dawn()),
        local(edo.sun.sunrise()),
        local(edo.sun.transit),
        local(edo.sun.sunset()),
        local(edo.sun.dusk()),
        if edo.sun.has_fallback() {
            "  (polar fallback)"
        } else {
            ""
        }
    );
    println!(
        "節気: {} ({})  候: {} {} ({})  黄経 {:.2}°",
        edo.sekki.term.name(),
        edo.sekki.term.english(),
        edo.sekki.micro_season.sub_band().label(),
        edo.sekki.micro_season.name(),
        edo.sekki.micro_season.reading(),
        edo.sekki.solar_longitude
    );
    match &edo.lunar {
        Ok(day) => println!(
            "旧暦: {}年 {} ({})  六曜: {}",
            day.lunar.year(),
            day.lunar,
            day.lunar.month_name(),
            day.rokuyo
        ),
        Err(e) => println!("旧暦: unavailable ({})", e.reason()),
    }
    match &edo.moon {
        Ok(moon) => println!(
            "月齢: {:.1} {} ({:.0}%)",
            moon.age,
            moon.phase().name(),
            moon.illumination() * 100.0
        ),
        Err(e) => println!("月齢: unavailable ({})", e.reason()),
    }

    if schedule {
        for koku in edo.day_schedule.iter().chain(edo.night_schedule.iter()) {
            let marker = if *koku == edo.temporal { "▶" } else { " " };
            println!(
                "{marker} {}{} {:<6} {}–{}",
                koku.period.label(),
                koku.koku,
                koku.name(),
                local(koku.start),
                local(koku.end)
            );
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => EdoConfig::load(path)?,
        None => EdoConfig::default(),
    };
    let zone = cli
        .tz
        .parse::<chrono_tz::Tz>()
        .map_err(|_| edo_time::Error::unknown_time_zone(&cli.tz))?;
    let location = Location::new(cli.lat, cli.lon, cli.tz.clone())?;
    let data = ReferenceData::bundled()?;
    let clock = EdoClock::with_config(TzResolver, &data, config)?;

    let instant = cli.at.unwrap_or_else(Utc::now);
    let edo = clock.compute(instant, &location)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&edo)?);
    } else {
        print_text(&edo, &zone, cli.schedule);
    }
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("edo-time: {e}");
        std::process::exit(1);
    }
}
