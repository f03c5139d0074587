// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use cdbtile_bsp::{Bsp, Feature, RectVisitor};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn to_features(v: &[Rect]) -> Vec<Feature> {
    v.iter()
        .enumerate()
        .map(|(i, r)| Feature::rect(i as u64, *r))
        .collect()
}

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.x0, r.y0], [r.x1, r.y1]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Rect::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("bsp_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_features(&rects),
                |features| {
                    let mut bsp: Bsp<Feature> = features.into_iter().collect();
                    bsp.generate();
                    let mut v = RectVisitor::new(query);
                    bsp.accept(&mut v);
                    black_box(v.results().len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners([query.x0, query.y0], [query.x1, query.y1]);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        // Query-only: both structures built once up front.
        let mut bsp: Bsp<Feature> = to_features(&rects).into_iter().collect();
        bsp.generate();
        let tree = RTree::bulk_load(to_rstar_rects(&rects));
        let aabb = AABB::from_corners([query.x0, query.y0], [query.x1, query.y1]);
        group.bench_function(format!("bsp_query_n{}", n), |b| {
            b.iter(|| black_box(bsp.query_rect(query).len()))
        });
        group.bench_function(format!("rstar_query_n{}", n), |b| {
            b.iter(|| black_box(tree.locate_in_envelope_intersecting(&aabb).count()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
