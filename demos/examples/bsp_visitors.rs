// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BSP visitors.
//!
//! Index a scatter of points, then run a custom visitor, a polygon query,
//! the leaf-density report and a polygon removal.
//!
//! Run:
//! - `cargo run -p cdbtile_demos --example bsp_visitors`

use cdbtile_bsp::{
    Bsp, BspConfig, BspVisitor, DensityVisitor, EditVisitor, Feature, NodeRef, Polygon,
    PolygonVisitor, traverse,
};
use kurbo::{Point, Rect};

/// Prints the tree shape, one line per node.
struct Outline;

impl<'a> BspVisitor<'a, Feature> for Outline {
    fn visiting(&mut self, node: NodeRef<'a, Feature>) {
        let indent = "  ".repeat(node.depth());
        if node.is_leaf() {
            println!("{indent}leaf: {} footprints", node.geometries().len());
        } else {
            println!(
                "{indent}{:?} split at {:.1}, {} straddlers",
                node.axis(),
                node.split(),
                node.geometries().len()
            );
        }
        traverse(self, node);
    }
}

fn main() {
    let mut bsp = Bsp::with_config(BspConfig {
        target_count: 8,
        max_depth: 4,
        ..Default::default()
    });
    // A dense cluster near the origin and a sparse spread elsewhere.
    for i in 0..40_u64 {
        let t = i as f64;
        bsp.add_geometry(Feature::point(i, (t * 0.37) % 5.0, (t * 0.73) % 5.0));
    }
    for i in 40..60_u64 {
        let t = (i - 40) as f64;
        bsp.add_geometry(Feature::point(i, 20.0 + t * 4.0, 10.0 + (t * 7.0) % 70.0));
    }
    // A large footprint that will straddle the root split.
    bsp.add_geometry(Feature::rect(100, Rect::new(0.0, 0.0, 100.0, 100.0)));
    bsp.generate();

    bsp.accept(&mut Outline);

    let triangle = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(0.0, 5.0),
    ]);
    let mut inside = PolygonVisitor::new(triangle.clone());
    bsp.accept(&mut inside);
    println!("points inside the triangle: {}", inside.results().len());

    let mut density = DensityVisitor::with_threshold(0.5);
    bsp.accept(&mut density);
    for leaf in density.results() {
        println!(
            "dense leaf {:?}: {} points, {:.2} per unit area",
            leaf.envelope, leaf.points, leaf.density
        );
    }

    let mut cut = EditVisitor::polygon_remove(triangle);
    bsp.accept_mut(&mut cut);
    println!(
        "removed {} points, {} footprints left",
        cut.removed_count(),
        bsp.len()
    );
}
