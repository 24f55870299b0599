use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsa_pragmatics::{PhiGrid, PolitenessConfig, PolitenessScenario, ReferenceConfig, ReferenceScenario};

fn bench_reference(c: &mut Criterion) {
    let scenario = ReferenceScenario::forced_choice();
    let config = ReferenceConfig::flat(1.0, 0.1, 3);
    c.bench_function("reference_predictions", |b| {
        b.iter(|| scenario.predictions(black_box(&config)).unwrap())
    });
}

fn bench_polite_speaker(c: &mut Criterion) {
    let scenario = PolitenessScenario::review_game();
    let config = PolitenessConfig {
        alpha: 10.0,
        phi: 0.99,
        social_value: 1.25,
    };
    c.bench_function("politeness_speaker", |b| {
        b.iter(|| scenario.speaker(black_box(&config)).unwrap())
    });
}

fn bench_grid_listener(c: &mut Criterion) {
    let scenario = PolitenessScenario::review_game();
    let grid = PhiGrid::flat();
    c.bench_function("politeness_listener_grid", |b| {
        b.iter(|| scenario.listener(10.0, 1.25, black_box(&grid)).unwrap())
    });
}

criterion_group!(benches, bench_reference, bench_polite_speaker, bench_grid_listener);
criterion_main!(benches);
