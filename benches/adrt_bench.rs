use adrt::{adrt, bdrt, iadrt, num_iters, AdrtShape, ImageShape, IterRange};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::distributions::Uniform;
use rand::Rng;

fn bench_adrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("adrt forward");
    for &n in &[16usize, 32, 64, 128, 256] {
        let shape = ImageShape::new(1, n);
        let input: Vec<f32> = rand::thread_rng()
            .sample_iter(Uniform::new(-1.0, 1.0))
            .take(shape.len())
            .collect();
        let iters = IterRange::full(num_iters(n));
        group.bench_with_input(BenchmarkId::new("N", n), &input, |b, input| {
            b.iter(|| adrt(input, shape, iters).unwrap())
        });
    }
    group.finish();
}

fn bench_iadrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("adrt inverse");
    for &n in &[16usize, 32, 64, 128] {
        let shape = ImageShape::new(1, n);
        let image: Vec<f32> = rand::thread_rng()
            .sample_iter(Uniform::new(-1.0, 1.0))
            .take(shape.len())
            .collect();
        let iters = IterRange::full(num_iters(n));
        let fwd = adrt(&image, shape, iters).unwrap();
        let adrt_shape = AdrtShape::new(1, n);
        group.bench_with_input(BenchmarkId::new("N", n), &fwd, |b, fwd| {
            b.iter(|| iadrt(fwd, adrt_shape, iters).unwrap())
        });
    }
    group.finish();
}

fn bench_bdrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("adrt back-projection");
    for &n in &[16usize, 32, 64, 128] {
        let adrt_shape = AdrtShape::new(1, n);
        let grad: Vec<f32> = rand::thread_rng()
            .sample_iter(Uniform::new(-1.0, 1.0))
            .take(adrt_shape.len())
            .collect();
        let iters = IterRange::full(num_iters(n));
        group.bench_with_input(BenchmarkId::new("N", n), &grad, |b, grad| {
            b.iter(|| bdrt(grad, adrt_shape, iters).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_adrt, bench_iadrt, bench_bdrt);
criterion_main!(benches);
