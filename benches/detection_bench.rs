use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ellipsoid_sweep::*;
use std::hint::black_box;

fn generate_grid_mesh(resolution: usize) -> (Vec<f32>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for y in 0..=resolution {
        for x in 0..=resolution {
            let height = (x as f32 * 0.3).sin() * (y as f32 * 0.2).cos();
            vertices.extend_from_slice(&[x as f32, y as f32, height]);
        }
    }
    let width = resolution + 1;
    for y in 0..resolution {
        for x in 0..resolution {
            let i = y * width + x;
            let a = i as u32;
            let b = (i + 1) as u32;
            let c = (i + width) as u32;
            let d = (i + width + 1) as u32;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }
    (vertices, indices)
}

fn grid_mesh(resolution: usize) -> CollisionMesh {
    let (vertices, indices) = generate_grid_mesh(resolution);
    CollisionMesh::build(&vertices, Some(&indices), false).expect("grid mesh is valid")
}

fn falling_packets(resolution: usize, count: usize) -> Vec<CollisionPacket> {
    (0..count)
        .map(|i| {
            let x = (i * 7 % resolution) as f32 + 0.5;
            let y = (i * 13 % resolution) as f32 + 0.5;
            CollisionPacket::sphere(Vec3::new(x, y, 3.0), Vec3::new(0.2, 0.1, -5.0), 0.5)
                .expect("radius is valid")
        })
        .collect()
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let detector = CollisionDetector::new();
    for &res in &[16usize, 32, 64] {
        let mesh = grid_mesh(res);
        group.bench_with_input(BenchmarkId::new("single_packet", res), &res, |b, &res| {
            let mut packet = falling_packets(res, 1).remove(0);
            b.iter(|| black_box(detector.detect(&mesh, &mut packet)))
        });
    }
    group.finish();
}

fn bench_detect_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_all");
    let detector = CollisionDetector::new();
    let res = 32;
    let mesh = grid_mesh(res);
    for &count in &[64usize, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("packets", count), &count, |b, &count| {
            let mut packets = falling_packets(res, count);
            b.iter(|| black_box(detect_all(&detector, &mesh, &mut packets)))
        });
    }
    group.finish();
}

fn bench_collide_and_slide(c: &mut Criterion) {
    let mesh = grid_mesh(32);
    let mut collider =
        EllipsoidCollider::new(Vec3::new(0.4, 0.4, 0.9), SlideResponse).expect("radius is valid");

    c.bench_function("collide_and_slide", |b| {
        b.iter(|| {
            black_box(collider.collide(
                &mesh,
                Vec3::new(4.0, 4.0, 2.5),
                Vec3::new(3.0, 2.0, -4.0),
            ))
        })
    });
}

fn bench_mesh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    for &res in &[16usize, 32, 64] {
        group.bench_with_input(BenchmarkId::new("build", res), &res, |b, &res| {
            let (vertices, indices) = generate_grid_mesh(res);
            b.iter(|| {
                let mesh = MeshBuilder::new(vertices.clone())
                    .indices(indices.clone())
                    .weld_vertices(0.001)
                    .build();
                black_box(mesh)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_detect,
    bench_detect_all,
    bench_collide_and_slide,
    bench_mesh_build
);
criterion_main!(benches);
