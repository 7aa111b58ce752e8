//! Benchmarks for vault lock and unlock
//!
//! Unlock cost is dominated by template × vault matching plus one
//! (degree + 1)-column least-squares solve.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keychain::template::generate_random_template;
use keychain::{VaultConfig, VaultLocker, VaultUnlocker};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SECRET: &str = "WHAT'S UP?";

fn benchmark_lock(c: &mut Criterion) {
    let config = VaultConfig::default();
    let locker = VaultLocker::new(config.clone());
    let mut group = c.benchmark_group("vault_lock");

    for size in [8usize, 30, 100] {
        let template = generate_random_template(size, config.digits_width, &mut StdRng::seed_from_u64(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &template, |b, template| {
            let mut rng = StdRng::seed_from_u64(2);
            b.iter(|| locker.lock(black_box(SECRET), black_box(template), &mut rng));
        });
    }

    group.finish();
}

fn benchmark_unlock(c: &mut Criterion) {
    let config = VaultConfig::default();
    let locker = VaultLocker::new(config.clone());
    let unlocker = VaultUnlocker::new(config.clone());
    let mut group = c.benchmark_group("vault_unlock");

    for size in [8usize, 30, 100] {
        let template = generate_random_template(size, config.digits_width, &mut StdRng::seed_from_u64(1));
        let Ok(vault) = locker.lock(SECRET, &template, &mut StdRng::seed_from_u64(2)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &vault, |b, vault| {
            b.iter(|| unlocker.unlock(black_box(&template), black_box(vault)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lock, benchmark_unlock);
criterion_main!(benches);
