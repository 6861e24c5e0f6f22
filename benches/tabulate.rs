use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pairtab::tabulate::{Tabulator, TabulatorConfig};
use pairtab::twobody::{
    Combined, HardSphereCoulomb, IsotropicTwobodyEnergy, LennardJones, TabulatedPotential,
};

fn lj_config(sigma: f64) -> TabulatorConfig {
    TabulatorConfig::default()
        .with_range(0.9 * sigma, 2.5 * sigma)
        .with_tolerance(1e-5)
}

/// Table construction for increasingly strict tolerances
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let lj = LennardJones::new(0.5, 6.0);

    for tolerance in [1e-2, 1e-4, 1e-6] {
        let config = lj_config(6.0).with_tolerance(tolerance);
        group.bench_with_input(
            BenchmarkId::new("LennardJones", tolerance),
            &config,
            |b, config| {
                b.iter(|| {
                    Tabulator::new(config.clone())
                        .generate(&|rsq: f64| lj.isotropic_twobody_energy(rsq))
                })
            },
        );
    }
    group.finish();
}

/// Single-pair benchmarks
fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");

    let sigma: f64 = 6.0;
    let epsilon: f64 = 0.5;
    let r_squared = (1.2 * sigma).powi(2);

    let lj = LennardJones::new(epsilon, sigma);
    group.bench_function("LennardJones", |b| {
        b.iter(|| lj.isotropic_twobody_energy(black_box(r_squared)))
    });

    let tabulated = TabulatedPotential::new(&lj, lj_config(sigma)).unwrap();
    group.bench_function("LennardJones_tabulated", |b| {
        b.iter(|| tabulated.isotropic_twobody_energy(black_box(r_squared)))
    });

    group.finish();
}

/// Generate test distances (squared) for batch benchmarks
fn generate_distances(n: usize, sigma: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let r = sigma * (0.9 + 1.5 * (i as f64) / (n as f64));
            r * r
        })
        .collect()
}

/// Batch benchmarks, analytical vs. tabulated
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    let sigma: f64 = 6.0;
    let n_pairs = 10000;
    let distances = generate_distances(n_pairs, sigma);

    let combined = Combined::new(
        LennardJones::new(0.5, sigma),
        HardSphereCoulomb::new(-1.0, 7.0, 0.8 * sigma),
    );
    let tabulated = TabulatedPotential::new(&combined, lj_config(sigma)).unwrap();

    group.bench_with_input(
        BenchmarkId::new("Combined", n_pairs),
        &distances,
        |b, dists| {
            b.iter(|| {
                dists
                    .iter()
                    .map(|&r2| combined.isotropic_twobody_energy(r2))
                    .sum::<f64>()
            })
        },
    );

    group.bench_with_input(
        BenchmarkId::new("Combined_tabulated", n_pairs),
        &distances,
        |b, dists| {
            b.iter(|| {
                dists
                    .iter()
                    .map(|&r2| tabulated.isotropic_twobody_energy(r2))
                    .sum::<f64>()
            })
        },
    );

    let mut out = vec![0.0; n_pairs];
    group.bench_with_input(
        BenchmarkId::new("Combined_tabulated_batch", n_pairs),
        &distances,
        |b, dists| b.iter(|| tabulated.energies_batch(dists, &mut out)),
    );

    group.finish();
}

criterion_group!(benches, bench_generate, bench_single, bench_batch);
criterion_main!(benches);
