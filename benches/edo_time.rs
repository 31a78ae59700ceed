use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use edo_time::solar::solar_coordinates;
use edo_time::temporal::{Period, koku_schedule, temporal_time};
use edo_time::zone::{FixedOffsetResolver, TzResolver};
use edo_time::{EdoClock, Location, ReferenceData};
use std::hint::black_box;

fn tokyo() -> Location {
    Location::new(35.6762, 139.6503, "Asia/Tokyo").unwrap()
}

fn benchmark_single_instant(c: &mut Criterion) {
    let data = ReferenceData::bundled().unwrap();
    let instant = "2026-06-21T03:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let location = tokyo();

    let fixed = EdoClock::new(
        FixedOffsetResolver::new()
            .with_zone("Asia/Tokyo", 9 * 3600)
            .unwrap(),
        &data,
    );
    c.bench_function("compute_fixed_offset", |b| {
        b.iter(|| fixed.compute(black_box(instant), black_box(&location)).unwrap())
    });

    let database = EdoClock::new(TzResolver, &data);
    c.bench_function("compute_tz_database", |b| {
        b.iter(|| database.compute(black_box(instant), black_box(&location)).unwrap())
    });

    c.bench_function("solar_coordinates", |b| {
        b.iter(|| solar_coordinates(black_box(&instant)))
    });

    let dawn = "2026-06-20T18:47:00Z".parse::<DateTime<Utc>>().unwrap();
    let dusk = "2026-06-21T10:38:00Z".parse::<DateTime<Utc>>().unwrap();
    c.bench_function("temporal_time", |b| {
        b.iter(|| temporal_time(black_box(dawn), black_box(dusk), black_box(instant), None))
    });
    c.bench_function("koku_schedule", |b| {
        b.iter(|| koku_schedule(Period::Day, black_box(dawn), black_box(dusk)))
    });
}

fn benchmark_series(c: &mut Criterion) {
    let data = ReferenceData::bundled().unwrap();
    let clock = EdoClock::new(TzResolver, &data);
    let location = tokyo();
    let start = "2026-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

    let mut group = c.benchmark_group("series_fixed_location");
    for hours in [24_i64, 24 * 7, 24 * 30] {
        group.throughput(Throughput::Elements(hours as u64));
        group.bench_with_input(BenchmarkId::new("hourly", hours), &hours, |b, &hours| {
            let end = start + Duration::hours(hours);
            b.iter(|| {
                clock
                    .series(black_box(&location), start, end, Duration::hours(1))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn benchmark_reference_data(c: &mut Criterion) {
    c.bench_function("load_bundled_data", |b| {
        b.iter(|| ReferenceData::bundled().unwrap())
    });

    let data = ReferenceData::bundled().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2027, 8, 15).unwrap();
    c.bench_function("lunar_lookup", |b| {
        b.iter(|| data.lunar().lookup(black_box(date)).unwrap())
    });
    let instant = "2027-08-15T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    c.bench_function("moon_age", |b| {
        b.iter(|| data.new_moons().moon_age(black_box(instant)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_single_instant,
    benchmark_series,
    benchmark_reference_data
);
criterion_main!(benches);
