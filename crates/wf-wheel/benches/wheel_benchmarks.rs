//! Selection and animation benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wf_wheel::{
    Color, Easing, RandomSource, SegmentSet, SeededRandom, SpinController, SpinSettings,
    WeightedSelector,
};

fn weighted_set(n: usize) -> SegmentSet {
    let mut set = SegmentSet::new();
    for i in 0..n {
        set.add_segment(format!("S{i}"), Color::WHITE, (i % 7) as f64 + 0.5);
    }
    set
}

fn bench_select_8(c: &mut Criterion) {
    let set = SegmentSet::stock();
    let mut rng = SeededRandom::from_seed(1);

    c.bench_function("select_weighted_8", |b| {
        b.iter(|| WeightedSelector::select(black_box(&set), rng.next_unit()))
    });
}

fn bench_select_256(c: &mut Criterion) {
    let set = weighted_set(256);
    let mut rng = SeededRandom::from_seed(1);

    c.bench_function("select_weighted_256", |b| {
        b.iter(|| WeightedSelector::select(black_box(&set), rng.next_unit()))
    });
}

fn bench_full_spin_60fps(c: &mut Criterion) {
    let mut controller = SpinController::with_seed(
        SegmentSet::stock(),
        SpinSettings::fixed(6, 4.0, Easing::EaseOutQuart),
        7,
    );

    c.bench_function("full_spin_60fps", |b| {
        b.iter(|| {
            controller.spin();
            while !controller.tick(black_box(1.0 / 60.0)).is_finished() {}
        })
    });
}

criterion_group!(benches, bench_select_8, bench_select_256, bench_full_spin_60fps);
criterion_main!(benches);
