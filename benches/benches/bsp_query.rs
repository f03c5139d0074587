// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cdbtile_bsp::{Bsp, BspConfig, DensityVisitor, Feature, Footprint, overlaps};
use cdbtile_grid::{CoordinatesRange, Dataset, Lod, generate_tiles};
use cdbtile_jobs::{BinderSettings, IdentityProjector, InputFootprint, TileJobBinder};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_grid_features(n: usize, cell: f64) -> Vec<Feature> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let id = (y * n + x) as u64;
            out.push(Feature::rect(id, Rect::new(x0, y0, x0 + cell, y0 + cell)));
        }
    }
    out
}

/// Mesh-tile-like footprints: mostly small, some an order of magnitude larger.
fn gen_mixed_features(count: usize, extent: f64) -> Vec<Feature> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let x0 = rng.next_f64() * extent;
            let y0 = rng.next_f64() * extent;
            let size = if i % 16 == 0 { 120.0 } else { 12.0 };
            Feature::rect(i as u64, Rect::new(x0, y0, x0 + size, y0 + size))
        })
        .collect()
}

fn gen_points(count: usize, extent: f64) -> Vec<Feature> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|i| Feature::point(i as u64, rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn built(features: &[Feature]) -> Bsp<Feature> {
    let mut bsp = Bsp::new();
    bsp.extend(features.iter().cloned());
    bsp.generate();
    bsp
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bsp_build");
    for &n in &[32usize, 64, 128] {
        let features = gen_grid_features(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("generate_grid_n{}", n), |b| {
            b.iter_batched(
                || features.clone(),
                |features| {
                    let mut bsp: Bsp<Feature> = features.into_iter().collect();
                    bsp.generate();
                    black_box(bsp.node_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    for &target in &[4usize, 10, 32] {
        let features = gen_mixed_features(10_000, 2000.0);
        group.bench_function(format!("generate_mixed_target{}", target), |b| {
            b.iter_batched(
                || features.clone(),
                |features| {
                    let mut bsp = Bsp::with_config(BspConfig {
                        target_count: target,
                        max_depth: 16,
                        ..Default::default()
                    });
                    bsp.extend(features);
                    bsp.generate();
                    black_box(bsp.max_depth_reached());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query_vs_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_query");
    let queries = [
        Rect::new(100.0, 100.0, 140.0, 140.0),
        Rect::new(500.0, 500.0, 900.0, 900.0),
        Rect::new(0.0, 990.0, 2000.0, 1010.0),
    ];
    for &count in &[1_000usize, 10_000, 50_000] {
        let features = gen_mixed_features(count, 2000.0);
        let bsp = built(&features);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("bsp_n{}", count), |b| {
            b.iter(|| {
                let hits: usize = queries.iter().map(|q| bsp.query_rect(*q).len()).sum();
                black_box(hits);
            })
        });
        let envelopes: Vec<Rect> = features
            .iter()
            .map(|f| f.envelope().unwrap_or(Rect::ZERO))
            .collect();
        group.bench_function(format!("linear_scan_n{}", count), |b| {
            b.iter(|| {
                let hits: usize = queries
                    .iter()
                    .map(|q| envelopes.iter().filter(|e| overlaps(e, q)).count())
                    .sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaf_density");
    let bsp = built(&gen_points(20_000, 1000.0));
    group.bench_function("points_n20000", |b| {
        b.iter(|| {
            let mut v = DensityVisitor::new();
            bsp.accept(&mut v);
            black_box(v.results().len());
        })
    });
    group.finish();
}

fn bench_tiles_and_jobs(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_jobs");
    let region = CoordinatesRange::from_bounds(6.5, 8.5, 44.5, 46.5);
    for &lod in &[2, 5, 8] {
        group.bench_function(format!("generate_tiles_lod{}", lod), |b| {
            b.iter(|| {
                let tiles = generate_tiles(&region, Dataset::Imagery, Lod::new(lod));
                black_box(tiles.len());
            })
        });
    }

    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let inputs: Vec<InputFootprint> = (0..5_000)
        .map(|i| {
            let x = 7.0 + rng.next_f64();
            let y = 45.0 + rng.next_f64();
            InputFootprint::new(x, y, x + 0.01, y + 0.01, format!("m/{i}.obj"))
        })
        .collect();
    let binder = TileJobBinder::bind(IdentityProjector, BinderSettings::new("cdb"), inputs)
        .expect("inputs are finite");
    group.bench_function("collect_render_jobs_lod4", |b| {
        b.iter(|| {
            let jobs = binder.collect_render_jobs(Dataset::Imagery, Lod::new(4));
            black_box(jobs.len());
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query_vs_scan,
    bench_density,
    bench_tiles_and_jobs
);
criterion_main!(benches);
