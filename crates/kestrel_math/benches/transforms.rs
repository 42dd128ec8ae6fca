//! Benchmarks for transform composition, inversion and interpolation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use kestrel_math::prelude::*;
use kestrel_math::upload::pack_f32;

fn sample_transform() -> Mat4 {
    Mat4::from_rotation_translation_scale(
        &Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.8),
        Vec3::new(4.0, -2.0, 7.5),
        Vec3::new(1.5, 1.5, 2.0),
    )
}

fn bench_mat4_multiply(c: &mut Criterion) {
    let a = sample_transform();
    let b = Mat4::perspective(to_radian(60.0), 16.0 / 9.0, 0.1, 100.0);

    c.bench_function("mat4_multiply", |bench| {
        bench.iter(|| black_box(a).multiply(black_box(b)))
    });
}

fn bench_mat4_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("mat4_invert");
    let m = sample_transform();

    group.bench_function("invert", |b| b.iter(|| black_box(m).invert()));
    group.bench_function("checked_invert", |b| b.iter(|| black_box(m).checked_invert()));
    group.bench_function("decompose", |b| b.iter(|| black_box(m).decompose()));

    group.finish();
}

fn bench_camera(c: &mut Criterion) {
    let mut group = c.benchmark_group("camera");
    let eye = Vec3::new(3.0, 4.0, 5.0);

    group.bench_function("look_at", |b| {
        b.iter(|| Mat4::look_at(black_box(eye), Vec3::ZERO, Vec3::Y))
    });
    group.bench_function("perspective", |b| {
        b.iter(|| Mat4::perspective(black_box(0.7), 1.5, 0.1, 100.0))
    });

    group.finish();
}

fn bench_slerp(c: &mut Criterion) {
    let mut group = c.benchmark_group("quat_slerp");
    let mut rng = StdRng::seed_from_u64(42);
    let a = Quat::random(&mut rng);
    let b = Quat::random(&mut rng);

    group.bench_function("single", |bench| {
        bench.iter(|| black_box(a).slerp(black_box(b), 0.5))
    });

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("batch", count), &count, |bench, &count| {
            bench.iter(|| {
                for i in 0..count {
                    let t = i as f64 / count as f64;
                    let _ = a.slerp(black_box(b), t);
                }
            })
        });
    }

    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_f32");

    for count in [16, 256, 4096] {
        let transforms = vec![sample_transform(); count];
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("mat4", count), &transforms, |b, transforms| {
            b.iter(|| pack_f32(black_box(transforms)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mat4_multiply,
    bench_mat4_invert,
    bench_camera,
    bench_slerp,
    bench_pack,
);
criterion_main!(benches);
