// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon-bounded point query.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::footprint::{Footprint, Polygon};
use crate::visitor::{BspVisitor, NodeRef, traverse_within};

/// Collects point footprints lying inside or on a window polygon.
///
/// The window's envelope prunes the descent. Non-point footprints are
/// skipped, and a window without a valid envelope matches nothing.
#[derive(Debug)]
pub struct PolygonVisitor<'a, F> {
    window: Polygon,
    bounds: Option<Rect>,
    results: Vec<&'a F>,
}

impl<'a, F> PolygonVisitor<'a, F> {
    /// Query `window`.
    pub fn new(window: Polygon) -> Self {
        let bounds = window.envelope();
        Self {
            window,
            bounds,
            results: Vec::new(),
        }
    }

    /// The window polygon.
    pub fn window(&self) -> &Polygon {
        &self.window
    }

    /// Collected footprints so far, in traversal order.
    pub fn results(&self) -> &[&'a F] {
        &self.results
    }

    /// Consume the visitor, returning its results.
    pub fn into_results(self) -> Vec<&'a F> {
        self.results
    }
}

impl<'a, F: Footprint + 'a> BspVisitor<'a, F> for PolygonVisitor<'a, F> {
    fn visiting(&mut self, node: NodeRef<'a, F>) {
        let Some(bounds) = self.bounds else {
            return;
        };
        for f in node.geometries() {
            if let Some(pt) = f.as_point()
                && self.window.contains(pt)
            {
                self.results.push(f);
            }
        }
        traverse_within(self, node, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::{Bsp, BspConfig};
    use crate::footprint::Feature;
    use alloc::vec;
    use kurbo::Point;

    fn scattered() -> Bsp<Feature> {
        let mut bsp = Bsp::with_config(BspConfig {
            target_count: 2,
            ..Default::default()
        });
        bsp.add_geometry(Feature::point(1, 1.0, 1.0));
        bsp.add_geometry(Feature::point(2, 4.0, 0.0));
        bsp.add_geometry(Feature::point(3, 2.0, 3.0));
        bsp.add_geometry(Feature::point(4, 9.0, 9.0));
        bsp.add_geometry(Feature::rect(5, Rect::new(0.0, 0.0, 2.0, 2.0)));
        bsp.generate();
        bsp
    }

    fn ids(v: &[&Feature]) -> Vec<u64> {
        let mut out: Vec<u64> = v.iter().map(|f| f.id.get()).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn triangle_window_collects_points_only() {
        let bsp = scattered();
        let tri = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ]);
        let mut v = PolygonVisitor::new(tri);
        bsp.accept(&mut v);
        // (4, 0) is a vertex, (2, 3) is outside the hypotenuse, 5 is not a point.
        assert_eq!(ids(v.results()), [1, 2]);
    }

    #[test]
    fn degenerate_window_matches_nothing() {
        let bsp = scattered();
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let mut v = PolygonVisitor::new(line);
        bsp.accept(&mut v);
        assert!(v.into_results().is_empty());
    }
}
