use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use racepace::{
    intensity, Duration, DistanceUnit, HeartRateZoneCalculator, IntensityModel, LongRunPlanner,
    Pace, VdotCalculator,
};

/// Performance benchmarks for the pace calculators
///
/// The ladder is the only calculation whose cost grows with its input, so it is
/// measured across run lengths up to the default CLI limit.

fn bench_long_run_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("Long Run Ladder");
    let goal = Pace::new(Duration::from_secs(390), DistanceUnit::Mi);

    for &length in &[10u32, 100, 1000] {
        group.throughput(Throughput::Elements(u64::from(length)));
        group.bench_with_input(BenchmarkId::new("ladder", length), &length, |b, &length| {
            b.iter(|| LongRunPlanner::ladder(black_box(length), DistanceUnit::Mi, goal))
        });
    }

    group.finish();
}

fn bench_vdot(c: &mut Criterion) {
    let mut group = c.benchmark_group("VDOT");

    group.bench_function("estimate_5k", |b| {
        b.iter(|| VdotCalculator::estimate(black_box(5000.0), Duration::from_mins(20)))
    });

    group.bench_function("training_paces_mi", |b| {
        b.iter(|| {
            VdotCalculator::training_paces(black_box(49.8))
                .and_then(|set| set.in_unit(DistanceUnit::Mi))
        })
    });

    group.finish();
}

fn bench_durations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Duration Codec");
    let inputs = ["6:30", "20:00", "1:29:59", "3:24:35"];

    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("parse_and_format", |b| {
        b.iter(|| {
            for text in &inputs {
                if let Ok(duration) = Duration::parse(black_box(text)) {
                    black_box(duration.format());
                }
            }
        })
    });

    group.finish();
}

fn bench_intensity(c: &mut Criterion) {
    let race = Pace::new(Duration::from_secs(360), DistanceUnit::Mi);

    c.bench_function("workout_paces_speed", |b| {
        b.iter(|| intensity::workout_paces(black_box(race), IntensityModel::Speed))
    });

    c.bench_function("heart_rate_zones", |b| {
        b.iter(|| HeartRateZoneCalculator::zones(black_box(185)))
    });
}

criterion_group!(
    benches,
    bench_long_run_ladder,
    bench_vdot,
    bench_durations,
    bench_intensity
);
criterion_main!(benches);
