use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nbody_bench::{advance, canonical_system, create_system_seeded, energy, offset_momentum, DELTA_T};

fn run_steps(steps: u64, mut bodies: Vec<nbody_bench::Body>) -> f64 {
    offset_momentum(&mut bodies);
    black_box(energy(&bodies));
    for _ in 0..steps {
        advance(&mut bodies, DELTA_T);
    }
    energy(&bodies)
}

pub fn n_body_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("n-body canonical system");
    for steps in [10_000u64, 100_000] {
        group.bench_function(format!("{steps} steps"), |b| {
            b.iter(|| black_box(run_steps(steps, canonical_system())));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("n-body random system, 1_000 steps");
    group.sample_size(10);
    for n in [16u32, 64, 256] {
        let bodies = create_system_seeded(Some(n), Some(42));
        group.bench_function(format!("{n} bodies"), |b| {
            b.iter(|| black_box(run_steps(1_000, bodies.clone())));
        });
    }
    group.finish();
}

criterion_group!(benches, n_body_benchmark);
criterion_main!(benches);
