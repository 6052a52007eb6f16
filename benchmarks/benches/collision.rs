//! Slope collision benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench collision
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench collision -- sat

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use tile_slopes::geometry::sat::{is_separating_axis, test_polygon_polygon};
use tile_slopes::geometry::{Rect, Response};
use tile_slopes::{Body, SlopeMap, SlopeType, SlopeWorld, SolverConfig, TileLayer};

fn setup_layer(width: usize, height: usize) -> (SlopeWorld, TileLayer) {
    let world = SlopeWorld::new(SolverConfig::default());
    let map = SlopeMap::from_types([
        (1, SlopeType::Full),
        (2, SlopeType::HalfBottomRight),
        (3, SlopeType::HalfBottom),
        (4, SlopeType::QuarterBottomLeftLow),
    ]);

    let mut indices = vec![-1; width * height];
    for x in 0..width {
        // Bottom row of ground with a scattering of slopes above it
        indices[(height - 1) * width + x] = 1;
        indices[(height - 2) * width + x] = match x % 4 {
            0 => 2,
            1 => 3,
            2 => 4,
            _ => -1,
        };
    }

    let mut layer = TileLayer::from_indices(width, height, 16.0, 16.0, &indices);
    world.convert_layer(&mut layer, &map);
    (world, layer)
}

// ---------------------------------------------------------------------------
// SAT primitives
// ---------------------------------------------------------------------------

fn bench_sat(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("sat/is_separating_axis");
        let a = Rect::new(Vec2::new(0.0, 0.0), 16.0, 16.0).to_polygon();
        let b = Rect::new(Vec2::new(12.0, 4.0), 16.0, 16.0).to_polygon();
        let axis = Vec2::new(1.0, 0.0);

        group.bench_function("overlapping", |bench| {
            bench.iter(|| {
                let mut response = Response::new();
                is_separating_axis(
                    a.pos,
                    b.pos,
                    a.calc_points(),
                    b.calc_points(),
                    axis,
                    &mut response,
                )
            });
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("sat/test_polygon_polygon");
        let a = Rect::new(Vec2::new(0.0, 0.0), 16.0, 16.0).to_polygon();

        let b_hit = Rect::new(Vec2::new(12.0, 4.0), 16.0, 16.0).to_polygon();
        group.bench_function("intersecting", |bench| {
            bench.iter(|| {
                let mut response = Response::new();
                test_polygon_polygon(&a, &b_hit, &mut response)
            });
        });

        let b_miss = Rect::new(Vec2::new(40.0, 4.0), 16.0, 16.0).to_polygon();
        group.bench_function("separated", |bench| {
            bench.iter(|| {
                let mut response = Response::new();
                test_polygon_polygon(&a, &b_miss, &mut response)
            });
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Full collision pipeline
// ---------------------------------------------------------------------------

fn bench_collide(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("collide/single_tile");
        let (world, layer) = setup_layer(16, 4);

        group.bench_function("full_tile", |bench| {
            bench.iter(|| {
                let mut body = Body::new(51.0, 39.0, 10.0, 10.0);
                world.enable(&mut body);
                world.collide(&mut body, &layer, 3, 3, false)
            });
        });

        group.bench_function("slope_tile", |bench| {
            bench.iter(|| {
                let mut body = Body::new(3.0, 26.0, 10.0, 10.0);
                world.enable(&mut body);
                world.collide(&mut body, &layer, 0, 2, false)
            });
        });

        group.bench_function("overlap_only", |bench| {
            bench.iter(|| {
                let mut body = Body::new(51.0, 39.0, 10.0, 10.0);
                world.enable(&mut body);
                world.collide(&mut body, &layer, 3, 3, true)
            });
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("collide/row_sweep");
        for &width in &[16usize, 64, 256] {
            let (world, layer) = setup_layer(width, 4);
            let coords: Vec<(usize, usize)> = (0..width).map(|x| (x, 3)).collect();

            group.bench_with_input(BenchmarkId::from_parameter(width), &width, |bench, _| {
                bench.iter(|| {
                    let mut body = Body::new(3.0, 39.0, 10.0, 10.0);
                    world.enable(&mut body);
                    world.collide_tiles(&mut body, &layer, &coords, false)
                });
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Layer conversion
// ---------------------------------------------------------------------------

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/layer");
    let world = SlopeWorld::new(SolverConfig::default());
    let map = SlopeMap::from_types([(1, SlopeType::Full), (2, SlopeType::HalfBottomLeft)]);

    for &size in &[16usize, 64, 128] {
        let indices: Vec<i32> = (0..size * size)
            .map(|i| if i % 3 == 0 { 1 } else { 2 })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| {
                let mut layer = TileLayer::from_indices(size, size, 16.0, 16.0, &indices);
                world.convert_layer(&mut layer, &map);
                layer
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sat, bench_collide, bench_convert);
criterion_main!(benches);
