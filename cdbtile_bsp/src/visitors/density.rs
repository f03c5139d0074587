// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf point density report.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::footprint::Footprint;
use crate::visitor::{BspVisitor, NodeRef, traverse};

/// Point density of one leaf.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LeafDensity {
    /// Bounding box of the leaf's points, with a zero-width axis widened by 1.
    pub envelope: Rect,
    /// Number of point footprints in the leaf.
    pub points: usize,
    /// `points / max(area, 1)`.
    pub density: f64,
}

/// Reports the point density of every leaf holding point footprints.
///
/// Visits every node; only leaves produce results. Leaves whose density
/// falls below the threshold are dropped.
#[derive(Clone, Debug, Default)]
pub struct DensityVisitor {
    threshold: f64,
    results: Vec<LeafDensity>,
}

impl DensityVisitor {
    /// Report every populated leaf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report leaves with density of at least `threshold`.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            results: Vec::new(),
        }
    }

    /// Current threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Reported leaves, in traversal order.
    pub fn results(&self) -> &[LeafDensity] {
        &self.results
    }

    /// Consume the visitor, returning its results.
    pub fn into_results(self) -> Vec<LeafDensity> {
        self.results
    }
}

/// Density of a run of points; `None` when there are none.
fn leaf_density<I>(points: I) -> Option<LeafDensity>
where
    I: IntoIterator<Item = kurbo::Point>,
{
    let mut count = 0_usize;
    let mut env: Option<Rect> = None;
    for pt in points {
        count += 1;
        env = Some(match env {
            Some(env) => env.union_pt(pt),
            None => Rect::from_points(pt, pt),
        });
    }
    let mut env = env?;
    if env.x0 == env.x1 {
        env.x1 += 1.0;
    }
    if env.y0 == env.y1 {
        env.y1 += 1.0;
    }
    let area = env.area().max(1.0);
    #[allow(
        clippy::cast_precision_loss,
        reason = "point counts stay far below 2^52"
    )]
    let density = count as f64 / area;
    Some(LeafDensity {
        envelope: env,
        points: count,
        density,
    })
}

impl<'a, F: Footprint + 'a> BspVisitor<'a, F> for DensityVisitor {
    fn visiting(&mut self, node: NodeRef<'a, F>) {
        if node.is_leaf() {
            let points = node
                .geometries()
                .iter()
                .filter_map(Footprint::as_point)
                .filter(|pt| pt.is_finite());
            if let Some(leaf) = leaf_density(points)
                && leaf.density >= self.threshold
            {
                self.results.push(leaf);
            }
        }
        traverse(self, node);
    }
}
