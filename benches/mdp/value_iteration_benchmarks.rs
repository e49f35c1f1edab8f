use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use valiter::mdp::{value_iteration, UpdateScheme, ValueIterationConfig};
use valiter::models::gridworld::GridworldConfig;

fn bench_gridworld(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridworld_value_iteration");
    for &size in &[5usize, 10, 20] {
        let grid = GridworldConfig {
            size,
            ..GridworldConfig::default()
        };
        let mdp = grid.build();
        for scheme in [UpdateScheme::InPlace, UpdateScheme::Synchronous] {
            let config = ValueIterationConfig::default()
                .with_gamma(grid.gamma)
                .with_scheme(scheme);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", scheme), size),
                &mdp,
                |b, mdp| b.iter(|| value_iteration(black_box(mdp), black_box(&config))),
            );
        }
    }
    group.finish();
}

fn bench_model_build(c: &mut Criterion) {
    c.bench_function("gridworld_build_10x10", |b| {
        b.iter(|| black_box(GridworldConfig::default()).build())
    });
}

criterion_group!(benches, bench_gridworld, bench_model_build);
criterion_main!(benches);
