use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use densealg::prelude::*;
use densealg::product::{kronecker, multiply, optimise_mult, outer};
use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn random_matrix<E: Element>(rows: usize, cols: usize, seed: u64) -> Matrix<E> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Matrix::random_normal(&mut rng, (rows, cols)).unwrap()
}

fn random_vector<E: Element>(n: usize, seed: u64) -> Vector<E> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Vector::random_normal(&mut rng, n).unwrap()
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for &size in &[16, 64, 256] {
        let a = random_matrix::<f64>(size, size, 1);
        let b = random_matrix::<f64>(size, size, 2);
        group.bench_with_input(BenchmarkId::new("f64", size), &size, |bench, _| {
            bench.iter(|| multiply(&a, &b).unwrap());
        });

        let za = random_matrix::<Complex64>(size, size, 3);
        let zb = random_matrix::<Complex64>(size, size, 4);
        group.bench_with_input(BenchmarkId::new("c64", size), &size, |bench, _| {
            bench.iter(|| multiply(&za, &zb).unwrap());
        });
    }

    group.finish();
}

fn bench_outer_kronecker(c: &mut Criterion) {
    let mut group = c.benchmark_group("outer_kronecker");

    for &size in &[8, 32, 128] {
        let u = random_vector::<f64>(size, 5);
        let v = random_vector::<f64>(size, 6);
        group.bench_with_input(BenchmarkId::new("outer", size), &size, |bench, _| {
            bench.iter(|| outer(&u, &v));
        });
    }

    for &size in &[4, 8, 16] {
        let a = random_matrix::<f64>(size, size, 7);
        let b = random_matrix::<f64>(size, size, 8);
        group.bench_with_input(BenchmarkId::new("kronecker", size), &size, |bench, _| {
            bench.iter(|| kronecker(&a, &b).unwrap());
        });
    }

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let chain = vec![
        random_matrix::<f64>(200, 10, 9),
        random_matrix::<f64>(10, 200, 10),
        random_matrix::<f64>(200, 5, 11),
    ];
    c.bench_function("optimise_mult_3", |bench| {
        bench.iter(|| optimise_mult(&chain).unwrap());
    });
}

criterion_group!(benches, bench_multiply, bench_outer_kronecker, bench_chain);
criterion_main!(benches);
