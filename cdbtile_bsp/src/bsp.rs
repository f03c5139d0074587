// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adaptive binary space partition.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Rect;

use crate::envelope::{BuildContext, EnvelopeCache};
use crate::footprint::{Footprint, Polygon};
use crate::types::{Axis, FootprintId, union_opt};
use crate::visitor::{BspVisitor, BspVisitorMut, NodeMut, NodeRef};
use crate::visitors::{EditVisitor, RectVisitor};

/// Subdivision limits for a [`Bsp`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BspConfig {
    /// Nodes deeper than this are never subdivided.
    pub max_depth: usize,
    /// A node is subdivided only while it holds at least this many geometries.
    pub target_count: usize,
    /// Split orientation of the root node.
    pub root_axis: Axis,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            target_count: 10,
            root_axis: Axis::Vertical,
        }
    }
}

/// Where a footprint goes when its node is split.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Min,
    Max,
    Here,
}

/// Routing rule shared by tree generation and edit insertion.
///
/// Footprints entirely at or above the split go to the max child, footprints
/// entirely below it go to the min child. Straddlers and malformed footprints
/// stay in the node itself.
pub(crate) fn route(axis: Axis, split: f64, envelope: Option<Rect>) -> Side {
    let Some(env) = envelope else {
        return Side::Here;
    };
    let (lo, hi) = axis.span(env);
    if lo >= split {
        Side::Max
    } else if hi < split {
        Side::Min
    } else {
        Side::Here
    }
}

/// One node of the partition.
///
/// Internal nodes keep the footprints that straddle their split line; leaves
/// keep everything routed to them.
#[derive(Debug)]
pub struct BspNode<F> {
    depth: usize,
    axis: Axis,
    split: f64,
    pub(crate) geometries: Vec<F>,
    pub(crate) children: Option<Box<(BspNode<F>, BspNode<F>)>>,
}

impl<F> BspNode<F> {
    pub(crate) fn new(depth: usize, axis: Axis) -> Self {
        Self {
            depth,
            axis,
            split: 0.0,
            geometries: Vec::new(),
            children: None,
        }
    }

    /// Depth of this node; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Orientation of the split line.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Split coordinate along [`axis`](Self::axis). Only meaningful once the
    /// node is subdivided.
    pub fn split(&self) -> f64 {
        self.split
    }

    /// Footprints owned by this node.
    pub fn geometries(&self) -> &[F] {
        &self.geometries
    }

    /// True until the node is subdivided.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The `(min, max)` children of a subdivided node.
    pub fn children(&self) -> Option<(&Self, &Self)> {
        self.children.as_deref().map(|(min, max)| (min, max))
    }

    fn count(&self) -> usize {
        self.geometries.len()
            + self
                .children()
                .map_or(0, |(min, max)| min.count() + max.count())
    }

    fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |(min, max)| min.node_count() + max.node_count())
    }

    fn max_depth_reached(&self) -> usize {
        self.children().map_or(self.depth, |(min, max)| {
            min.max_depth_reached().max(max.max_depth_reached())
        })
    }
}

impl<F: Footprint> BspNode<F> {
    /// Remove the first footprint in this node's own list with identity `id`.
    pub(crate) fn remove_geometry(
        &mut self,
        id: FootprintId,
        envelopes: &mut EnvelopeCache,
    ) -> Option<F> {
        let pos = self.geometries.iter().position(|f| f.id() == id)?;
        envelopes.remove(id);
        Some(self.geometries.remove(pos))
    }

    /// Drop every point footprint of this node's own list that lies inside or
    /// on `window`.
    pub(crate) fn remove_bounding_polygon(
        &mut self,
        window: &Polygon,
        envelopes: &mut EnvelopeCache,
    ) -> usize {
        let before = self.geometries.len();
        self.geometries.retain(|f| {
            let hit = f.as_point().is_some_and(|pt| window.contains(pt));
            if hit {
                envelopes.remove(f.id());
            }
            !hit
        });
        before - self.geometries.len()
    }

    pub(crate) fn generate(&mut self, config: &BspConfig, ctx: &mut BuildContext<'_>) {
        if self.children.is_some()
            || self.depth > config.max_depth
            || self.geometries.len() < config.target_count
        {
            return;
        }
        let mut bounds = None;
        for f in &self.geometries {
            if let Some(env) = ctx.envelope(f) {
                bounds = union_opt(bounds, env);
            }
        }
        let Some(bounds) = bounds else {
            return;
        };
        let (lo, hi) = self.axis.span(bounds);
        self.split = lo + (hi - lo) / 2.0;

        let mut min = Self::new(self.depth + 1, self.axis.flip());
        let mut max = Self::new(self.depth + 1, self.axis.flip());
        let mut retained = Vec::new();
        for f in core::mem::take(&mut self.geometries) {
            match route(self.axis, self.split, ctx.envelope(&f)) {
                Side::Min => min.geometries.push(f),
                Side::Max => max.geometries.push(f),
                Side::Here => retained.push(f),
            }
        }
        self.geometries = retained;
        min.generate(config, ctx);
        max.generate(config, ctx);
        self.children = Some(Box::new((min, max)));
    }
}

/// An adaptive, depth-bounded binary space partition over footprint envelopes.
///
/// Footprints are added to the root, then [`generate`](Self::generate) splits
/// nodes alternately on X and Y at the midpoint of their content until a node
/// is too deep or holds fewer than [`BspConfig::target_count`] geometries.
/// Queries run as visitors over the finished tree.
///
/// Envelopes are memoized in a tree-wide cache keyed by [`FootprintId`]. The
/// cache uses interior mutability so read-only queries can fill it; a `Bsp`
/// is therefore not `Sync`.
///
/// ```
/// use cdbtile_bsp::{Bsp, BspConfig, Feature};
/// use kurbo::Rect;
///
/// let mut bsp = Bsp::with_config(BspConfig { target_count: 1, ..Default::default() });
/// bsp.add_geometry(Feature::rect(1, Rect::new(0.0, 0.0, 1.0, 1.0)));
/// bsp.add_geometry(Feature::rect(2, Rect::new(5.0, 5.0, 6.0, 6.0)));
/// bsp.generate();
///
/// let hits = bsp.query_rect(Rect::new(4.0, 4.0, 7.0, 7.0));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id.get(), 2);
/// ```
#[derive(Debug)]
pub struct Bsp<F> {
    config: BspConfig,
    root: BspNode<F>,
    envelopes: RefCell<EnvelopeCache>,
}

impl<F: Footprint> Default for Bsp<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Footprint> Bsp<F> {
    /// An empty tree with the default [`BspConfig`].
    pub fn new() -> Self {
        Self::with_config(BspConfig::default())
    }

    /// An empty tree with custom subdivision limits.
    pub fn with_config(config: BspConfig) -> Self {
        Self {
            root: BspNode::new(0, config.root_axis),
            config,
            envelopes: RefCell::new(EnvelopeCache::new()),
        }
    }

    /// Subdivision limits in use.
    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Append a footprint to the root list. Takes effect on the partition at
    /// the next [`generate`](Self::generate) of a not yet subdivided root, or
    /// use [`insert`](Self::insert) to route it into a built tree.
    pub fn add_geometry(&mut self, footprint: F) {
        self.root.geometries.push(footprint);
    }

    /// Remove the first footprint with identity `id` from the root's own list.
    ///
    /// Children are not searched; use [`remove`](Self::remove) for a
    /// tree-wide removal.
    pub fn remove_geometry(&mut self, id: FootprintId) -> Option<F> {
        self.root.remove_geometry(id, self.envelopes.get_mut())
    }

    /// Drop every point footprint in the root's own list that lies inside or
    /// on `window`, returning how many were dropped.
    pub fn remove_bounding_polygon(&mut self, window: &Polygon) -> usize {
        self.root
            .remove_bounding_polygon(window, self.envelopes.get_mut())
    }

    /// Build the partition. A no-op once the root is subdivided.
    ///
    /// Envelopes computed during the build are released when it finishes;
    /// queries recompute them lazily.
    pub fn generate(&mut self) {
        let mut ctx = BuildContext::owning(self.envelopes.get_mut());
        self.root.generate(&self.config, &mut ctx);
        ctx.finish();
    }

    /// Build the partition with a caller-supplied context.
    ///
    /// The caller decides, through the context, whether computed envelopes
    /// survive the build, and calls [`BuildContext::finish`] itself.
    pub fn generate_with(&mut self, ctx: &mut BuildContext<'_>) {
        self.root.generate(&self.config, ctx);
    }

    /// Envelope of `footprint` from the tree-wide cache, computing it on first
    /// access. `None` for malformed footprints.
    pub fn geometry_envelope(&self, footprint: &F) -> Option<Rect> {
        self.envelopes.borrow_mut().get_or_compute(footprint)
    }

    /// Number of envelopes currently memoized.
    pub fn cached_envelopes(&self) -> usize {
        self.envelopes.borrow().len()
    }

    /// Run a read-only visitor from the root.
    pub fn accept<'a, V>(&'a self, visitor: &mut V)
    where
        V: BspVisitor<'a, F>,
    {
        visitor.visit(self.root());
    }

    /// Run a mutating visitor from the root.
    pub fn accept_mut<V>(&mut self, visitor: &mut V)
    where
        V: BspVisitorMut<F>,
    {
        visitor.visit_mut(NodeMut::new(&mut self.root, self.envelopes.get_mut()));
    }

    /// Footprints whose envelope intersects `bounds` (closed intervals), in
    /// traversal order.
    ///
    /// # Panics
    ///
    /// If `bounds` is inverted or has a NaN coordinate.
    pub fn query_rect(&self, bounds: Rect) -> Vec<&F> {
        let mut visitor = RectVisitor::new(bounds);
        self.accept(&mut visitor);
        visitor.into_results()
    }

    /// Route `footprint` into the built tree without subdividing.
    ///
    /// Returns the footprint back if it has no valid envelope.
    pub fn insert(&mut self, footprint: F) -> Result<(), F> {
        let mut visitor = EditVisitor::insert(footprint);
        self.accept_mut(&mut visitor);
        match visitor.take_pending() {
            Some(f) => Err(f),
            None => Ok(()),
        }
    }

    /// Remove `footprint` wherever it lives in the tree.
    pub fn remove(&mut self, footprint: &F) -> Option<F> {
        let mut visitor = EditVisitor::remove(footprint);
        self.accept_mut(&mut visitor);
        visitor.take_removed()
    }

    /// Read-only cursor at the root.
    pub fn root(&self) -> NodeRef<'_, F> {
        NodeRef::new(&self.root, &self.envelopes)
    }

    /// Total number of footprints held.
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// True if the tree holds no footprints.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Depth of the deepest node.
    pub fn max_depth_reached(&self) -> usize {
        self.root.max_depth_reached()
    }

    /// Whether [`generate`](Self::generate) split the root.
    pub fn is_subdivided(&self) -> bool {
        !self.root.is_leaf()
    }
}

impl<F: Footprint> Extend<F> for Bsp<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        self.root.geometries.extend(iter);
    }
}

impl<F: Footprint> FromIterator<F> for Bsp<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut bsp = Self::new();
        bsp.extend(iter);
        bsp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{Feature, Geometry};
    use alloc::vec;

    fn cfg(target_count: usize) -> BspConfig {
        BspConfig {
            target_count,
            ..Default::default()
        }
    }

    #[test]
    fn route_follows_split_rule() {
        let env = |x0, x1| Some(Rect::new(x0, 0.0, x1, 1.0));
        assert_eq!(route(Axis::Vertical, 3.0, env(3.0, 4.0)), Side::Max);
        assert_eq!(route(Axis::Vertical, 3.0, env(1.0, 2.9)), Side::Min);
        assert_eq!(route(Axis::Vertical, 3.0, env(2.0, 3.0)), Side::Here);
        assert_eq!(route(Axis::Vertical, 3.0, None), Side::Here);
        assert_eq!(
            route(Axis::Horizontal, 0.5, env(10.0, 20.0)),
            Side::Here,
            "horizontal split looks at Y"
        );
    }

    #[test]
    fn below_target_count_stays_leaf() {
        let mut bsp = Bsp::with_config(cfg(3));
        bsp.add_geometry(Feature::point(1, 0.0, 0.0));
        bsp.add_geometry(Feature::point(2, 1.0, 1.0));
        bsp.generate();
        assert!(!bsp.is_subdivided());
        assert_eq!(bsp.node_count(), 1);
    }

    #[test]
    fn generate_is_idempotent() {
        let mut bsp = Bsp::with_config(cfg(2));
        for i in 0..16_u32 {
            let v = f64::from(i);
            bsp.add_geometry(Feature::point(u64::from(i), v, v * 0.5));
        }
        bsp.generate();
        let nodes = bsp.node_count();
        let depth = bsp.max_depth_reached();
        bsp.generate();
        assert_eq!(bsp.node_count(), nodes);
        assert_eq!(bsp.max_depth_reached(), depth);
        assert_eq!(bsp.len(), 16);
    }

    #[test]
    fn max_depth_bounds_the_tree() {
        let mut bsp = Bsp::with_config(BspConfig {
            max_depth: 2,
            target_count: 1,
            root_axis: Axis::Vertical,
        });
        // Coincident points never separate, so only the depth bound stops them.
        for i in 0..4_u64 {
            bsp.add_geometry(Feature::point(i, 1.0, 1.0));
        }
        bsp.generate();
        assert_eq!(bsp.max_depth_reached(), 3);
        assert_eq!(bsp.len(), 4);
    }

    #[test]
    fn all_malformed_stays_leaf() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::new(1, Geometry::LineString(vec![])));
        bsp.add_geometry(Feature::point(2, f64::NAN, 0.0));
        bsp.generate();
        assert!(!bsp.is_subdivided());
        assert_eq!(bsp.root().geometries().len(), 2);
    }

    #[test]
    fn malformed_is_retained_at_root() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::rect(1, Rect::new(0.0, 0.0, 1.0, 1.0)));
        bsp.add_geometry(Feature::rect(2, Rect::new(8.0, 0.0, 9.0, 1.0)));
        bsp.add_geometry(Feature::new(3, Geometry::LineString(vec![])));
        bsp.generate();
        assert!(bsp.is_subdivided());
        let root_ids: Vec<u64> = bsp.root().geometries().iter().map(|f| f.id.get()).collect();
        assert_eq!(root_ids, [3]);
        assert_eq!(bsp.len(), 3);
    }

    #[test]
    fn horizontal_root_axis() {
        let mut bsp = Bsp::with_config(BspConfig {
            root_axis: Axis::Horizontal,
            ..cfg(2)
        });
        bsp.add_geometry(Feature::point(1, 0.0, 0.0));
        bsp.add_geometry(Feature::point(2, 0.0, 10.0));
        bsp.generate();
        let root = bsp.root();
        assert_eq!(root.axis(), Axis::Horizontal);
        assert_eq!(root.split(), 5.0);
        let (min, max) = root.children().unwrap();
        assert_eq!(min.axis(), Axis::Vertical);
        assert_eq!(min.geometries()[0].id.get(), 1);
        assert_eq!(max.geometries()[0].id.get(), 2);
    }

    #[test]
    fn generate_releases_build_envelopes() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::point(1, 0.0, 0.0));
        bsp.add_geometry(Feature::point(2, 4.0, 4.0));
        bsp.generate();
        assert_eq!(bsp.cached_envelopes(), 0);
        let _ = bsp.query_rect(Rect::new(-1.0, -1.0, 5.0, 5.0));
        assert_eq!(bsp.cached_envelopes(), 2);
    }

    #[test]
    fn generate_with_shared_context_keeps_envelopes() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::point(1, 0.0, 0.0));
        bsp.add_geometry(Feature::point(2, 4.0, 4.0));
        let mut cache = EnvelopeCache::new();
        let mut ctx = BuildContext::shared(&mut cache);
        bsp.generate_with(&mut ctx);
        ctx.finish();
        assert_eq!(cache.len(), 2);
        assert!(bsp.is_subdivided());
    }

    #[test]
    fn remove_geometry_searches_root_only() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::rect(1, Rect::new(0.0, 0.0, 10.0, 1.0)));
        bsp.add_geometry(Feature::point(2, 0.0, 0.0));
        bsp.add_geometry(Feature::point(3, 10.0, 0.0));
        bsp.generate();
        // 1 straddles the root split, 2 and 3 live in children.
        assert!(bsp.remove_geometry(FootprintId::new(2)).is_none());
        let removed = bsp.remove_geometry(FootprintId::new(1)).unwrap();
        assert_eq!(removed.id.get(), 1);
        assert_eq!(bsp.len(), 2);
    }

    #[test]
    fn remove_bounding_polygon_drops_points_only() {
        let mut bsp = Bsp::new();
        bsp.add_geometry(Feature::point(1, 1.0, 1.0));
        bsp.add_geometry(Feature::point(2, 2.0, 0.0));
        bsp.add_geometry(Feature::point(3, 9.0, 9.0));
        bsp.add_geometry(Feature::rect(4, Rect::new(0.5, 0.5, 1.5, 1.5)));
        let window = Polygon::from_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(bsp.remove_bounding_polygon(&window), 2);
        let left: Vec<u64> = bsp.root().geometries().iter().map(|f| f.id.get()).collect();
        assert_eq!(left, [3, 4]);
        assert_eq!(bsp.remove_bounding_polygon(&window), 0);
    }

    #[test]
    fn insert_and_remove_in_built_tree() {
        let mut bsp = Bsp::with_config(cfg(1));
        bsp.add_geometry(Feature::point(1, 0.0, 0.0));
        bsp.add_geometry(Feature::point(2, 10.0, 0.0));
        bsp.generate();
        let nodes = bsp.node_count();

        assert!(bsp.insert(Feature::point(3, 9.0, 0.0)).is_ok());
        assert_eq!(bsp.node_count(), nodes, "insert never subdivides");
        assert_eq!(bsp.len(), 3);
        let hits = bsp.query_rect(Rect::new(8.0, -1.0, 11.0, 1.0));
        assert_eq!(hits.len(), 2);

        let target = Feature::point(3, 9.0, 0.0);
        assert_eq!(bsp.remove(&target).map(|f| f.id.get()), Some(3));
        assert!(bsp.remove(&target).is_none());
        assert_eq!(bsp.len(), 2);

        let bad = Feature::point(4, f64::NAN, 0.0);
        assert!(bsp.insert(bad).is_err());
        assert_eq!(bsp.len(), 2);
    }

    #[test]
    fn from_iterator_collects_into_root() {
        let bsp: Bsp<Feature> = (0..5_u64).map(|i| Feature::point(i, 0.0, 0.0)).collect();
        assert_eq!(bsp.len(), 5);
        assert!(!bsp.is_subdivided());
    }
}
