use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use meeting_engine::{
    compute_availability, BusyInterval, EngineConfig, OutputMode, ParticipantSelection,
};
use std::hint::black_box;

/// Twenty participants over five days, each with a few staggered meetings a day.
fn fixture() -> (Vec<NaiveDate>, Vec<ParticipantSelection>, HashMap<String, Vec<BusyInterval>>) {
    let first = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let days: Vec<NaiveDate> = (0..5).map(|i| first + Duration::days(i)).collect();

    let mut selections = Vec::new();
    let mut busy = HashMap::new();
    for p in 0..20i64 {
        let id = format!("p{}", p);
        let mut intervals = Vec::new();
        for d in &days {
            for slot in 0..3i64 {
                let start = d.and_hms_opt(9, 0, 0).unwrap()
                    + Duration::minutes(p * 7 + slot * 150);
                intervals.push(BusyInterval::new(start, start + Duration::minutes(45)));
            }
        }
        selections.push(ParticipantSelection::new(id.clone(), days.clone()));
        busy.insert(id, intervals);
    }
    (days, selections, busy)
}

fn bench_compute(c: &mut Criterion) {
    let (days, selections, busy) = fixture();
    let config = EngineConfig::default();

    c.bench_function("compute_availability_20x5_intervals", |b| {
        b.iter(|| {
            compute_availability(
                black_box(&config),
                black_box(&days),
                black_box(&selections),
                30,
                &busy,
                OutputMode::Intervals,
            )
            .unwrap()
        })
    });

    let coarse = EngineConfig::default().with_granularity(15);
    c.bench_function("compute_availability_20x5_counts_15min", |b| {
        b.iter(|| {
            compute_availability(
                black_box(&coarse),
                black_box(&days),
                black_box(&selections),
                30,
                &busy,
                OutputMode::Counts,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
