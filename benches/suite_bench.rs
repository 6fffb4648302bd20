use criterion::{criterion_group, criterion_main, Criterion};
use mpm_unit_tests::catalog::default_registry;
use mpm_unit_tests::core::suite::build_suite;
use std::hint::black_box;

fn bench_build_suite(c: &mut Criterion) {
    let registry = default_registry(true);

    c.bench_function("build_suite_generic", |b| {
        b.iter(|| build_suite(black_box(&registry), black_box("")));
    });

    c.bench_function("build_suite_x4xx", |b| {
        b.iter(|| build_suite(black_box(&registry), black_box("x4xx")));
    });
}

criterion_group!(benches, bench_build_suite);
criterion_main!(benches);
