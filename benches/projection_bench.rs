use criterion::{criterion_group, criterion_main, Criterion};
use csg_brush_editor::core::{
    project_point_from_plane_3d, project_point_to_plane_2d, Plane, SpatialIndex,
};
use glam::Vec3;
use std::hint::black_box;

fn build_query_points(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let x = (i % 100) as f32 * 1.37;
            let y = ((i * 7) % 100) as f32 * 0.63;
            let z = ((i * 13) % 100) as f32 * 2.11;
            Vec3::new(x, y, z)
        })
        .collect()
}

fn bench_plane_projection(c: &mut Criterion) {
    let plane = Plane::from_point_normal(
        Vec3::new(3.0, -2.0, 7.0),
        Vec3::new(1.0, 2.0, 0.5).normalize(),
    );
    let points = build_query_points(1024);

    c.bench_function("plane_projection_roundtrip_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for &point in &points {
                let projected = project_point_to_plane_2d(black_box(&plane), black_box(point));
                let back = project_point_from_plane_3d(&plane, projected);
                acc += back.length_squared();
            }
            black_box(acc)
        })
    });
}

fn bench_spatial_nearest(c: &mut Criterion) {
    let index = SpatialIndex::from_points(
        build_query_points(4096)
            .into_iter()
            .enumerate()
            .map(|(i, p)| ((i / 64) as u64, i % 64, p)),
    );
    let queries = build_query_points(256);

    c.bench_function("spatial_nearest_256_of_4096", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &query in &queries {
                if index.nearest(black_box(query)).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

criterion_group!(benches, bench_plane_projection, bench_spatial_nearest);
criterion_main!(benches);
