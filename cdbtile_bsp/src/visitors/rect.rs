// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle range query.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::footprint::Footprint;
use crate::types::{is_ordered, overlaps};
use crate::visitor::{BspVisitor, NodeRef, traverse_within};

/// Collects every footprint whose envelope intersects a query rectangle.
///
/// Intersection is closed on both axes, so a footprint touching the query's
/// edge is collected. Malformed footprints are never collected.
#[derive(Debug)]
pub struct RectVisitor<'a, F> {
    bounds: Rect,
    results: Vec<&'a F>,
}

impl<'a, F> RectVisitor<'a, F> {
    /// Query `bounds`.
    ///
    /// # Panics
    ///
    /// If `bounds` is inverted on either axis or has a NaN coordinate.
    #[track_caller]
    pub fn new(bounds: Rect) -> Self {
        assert!(
            is_ordered(&bounds),
            "query rectangle must satisfy min <= max on both axes, got {bounds:?}"
        );
        Self {
            bounds,
            results: Vec::new(),
        }
    }

    /// Query `(min_x, min_y)`–`(max_x, max_y)`.
    ///
    /// # Panics
    ///
    /// If `min_x > max_x`, `min_y > max_y` or any bound is NaN.
    #[track_caller]
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Rect {
            x0: min_x,
            y0: min_y,
            x1: max_x,
            y1: max_y,
        })
    }

    /// The query rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
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

impl<'a, F: Footprint + 'a> BspVisitor<'a, F> for RectVisitor<'a, F> {
    fn visiting(&mut self, node: NodeRef<'a, F>) {
        for f in node.geometries() {
            if let Some(env) = node.envelope(f)
                && overlaps(&env, &self.bounds)
            {
                self.results.push(f);
            }
        }
        traverse_within(self, node, self.bounds);
    }
}
