// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The traversal contract shared by every query and edit.
//!
//! A visitor's [`visit`](BspVisitor::visit) dispatches to
//! [`visiting`](BspVisitor::visiting), whose default simply walks the min
//! child and then the max child via [`traverse`]. Visitors override
//! `visiting` to inspect the node and then delegate to [`traverse`] or, to
//! prune by a rectangle, [`traverse_within`].

use core::cell::RefCell;

use kurbo::Rect;

use crate::bsp::BspNode;
use crate::envelope::EnvelopeCache;
use crate::footprint::{Footprint, Polygon};
use crate::types::{Axis, FootprintId, le};

/// Read-only cursor at a node, carrying access to the tree's envelope cache.
pub struct NodeRef<'a, F> {
    node: &'a BspNode<F>,
    envelopes: &'a RefCell<EnvelopeCache>,
}

impl<F> Copy for NodeRef<'_, F> {}

impl<F> Clone for NodeRef<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> core::fmt::Debug for NodeRef<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("depth", &self.node.depth())
            .field("axis", &self.node.axis())
            .field("split", &self.node.split())
            .field("geometries", &self.node.geometries().len())
            .field("leaf", &self.node.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<'a, F> NodeRef<'a, F> {
    pub(crate) fn new(node: &'a BspNode<F>, envelopes: &'a RefCell<EnvelopeCache>) -> Self {
        Self { node, envelopes }
    }

    /// Depth of the node.
    pub fn depth(self) -> usize {
        self.node.depth()
    }

    /// Split orientation.
    pub fn axis(self) -> Axis {
        self.node.axis()
    }

    /// Split coordinate; only meaningful for subdivided nodes.
    pub fn split(self) -> f64 {
        self.node.split()
    }

    /// Footprints owned by the node.
    pub fn geometries(self) -> &'a [F] {
        self.node.geometries()
    }

    /// True if the node has no children.
    pub fn is_leaf(self) -> bool {
        self.node.is_leaf()
    }

    /// `(min, max)` children.
    pub fn children(self) -> Option<(Self, Self)> {
        let (min, max) = self.node.children()?;
        Some((Self::new(min, self.envelopes), Self::new(max, self.envelopes)))
    }
}

impl<F: Footprint> NodeRef<'_, F> {
    /// Cached envelope of `footprint`.
    pub fn envelope(self, footprint: &F) -> Option<Rect> {
        self.envelopes.borrow_mut().get_or_compute(footprint)
    }
}

/// Mutable cursor at a node.
///
/// Holds the node and the envelope cache exclusively, so children are
/// reached one at a time through [`min_child`](Self::min_child) and
/// [`max_child`](Self::max_child).
pub struct NodeMut<'a, F> {
    node: &'a mut BspNode<F>,
    envelopes: &'a mut EnvelopeCache,
}

impl<F> core::fmt::Debug for NodeMut<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeMut")
            .field("depth", &self.node.depth())
            .field("axis", &self.node.axis())
            .field("geometries", &self.node.geometries().len())
            .finish_non_exhaustive()
    }
}

impl<'a, F> NodeMut<'a, F> {
    pub(crate) fn new(node: &'a mut BspNode<F>, envelopes: &'a mut EnvelopeCache) -> Self {
        Self { node, envelopes }
    }

    /// Depth of the node.
    pub fn depth(&self) -> usize {
        self.node.depth()
    }

    /// Split orientation.
    pub fn axis(&self) -> Axis {
        self.node.axis()
    }

    /// Split coordinate; only meaningful for subdivided nodes.
    pub fn split(&self) -> f64 {
        self.node.split()
    }

    /// Footprints owned by the node.
    pub fn geometries(&self) -> &[F] {
        self.node.geometries()
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Cursor at the min child.
    pub fn min_child(&mut self) -> Option<NodeMut<'_, F>> {
        let (min, _) = self.node.children.as_deref_mut()?;
        Some(NodeMut::new(min, self.envelopes))
    }

    /// Cursor at the max child.
    pub fn max_child(&mut self) -> Option<NodeMut<'_, F>> {
        let (_, max) = self.node.children.as_deref_mut()?;
        Some(NodeMut::new(max, self.envelopes))
    }

    /// Append a footprint to this node's own list.
    pub fn push(&mut self, footprint: F) {
        self.node.geometries.push(footprint);
    }
}

impl<F: Footprint> NodeMut<'_, F> {
    /// Cached envelope of `footprint`.
    pub fn envelope(&mut self, footprint: &F) -> Option<Rect> {
        self.envelopes.get_or_compute(footprint)
    }

    /// Remove the first footprint of this node's own list with identity `id`
    /// and evict its cached envelope.
    pub fn remove_geometry(&mut self, id: FootprintId) -> Option<F> {
        self.node.remove_geometry(id, self.envelopes)
    }

    /// Drop every point footprint of this node's own list inside or on
    /// `window`; returns how many were dropped.
    pub fn remove_bounding_polygon(&mut self, window: &Polygon) -> usize {
        self.node.remove_bounding_polygon(window, self.envelopes)
    }
}

/// A read-only tree visitor.
pub trait BspVisitor<'a, F: 'a> {
    /// Entry point for a node.
    fn visit(&mut self, node: NodeRef<'a, F>) {
        self.visiting(node);
    }

    /// Per-node work. The default only descends.
    fn visiting(&mut self, node: NodeRef<'a, F>) {
        traverse(self, node);
    }
}

/// Visit the min child and then the max child, if present.
pub fn traverse<'a, F: 'a, V>(visitor: &mut V, node: NodeRef<'a, F>)
where
    V: BspVisitor<'a, F> + ?Sized,
{
    if let Some((min, max)) = node.children() {
        visitor.visit(min);
        visitor.visit(max);
    }
}

/// Like [`traverse`], skipping a child that cannot intersect `bounds`: the min
/// child is visited iff `bounds` starts at or before the split, the max child
/// iff `bounds` ends at or after it.
pub fn traverse_within<'a, F: 'a, V>(visitor: &mut V, node: NodeRef<'a, F>, bounds: Rect)
where
    V: BspVisitor<'a, F> + ?Sized,
{
    if let Some((min, max)) = node.children() {
        let (lo, hi) = node.axis().span(bounds);
        if le(lo, node.split()) {
            visitor.visit(min);
        }
        if le(node.split(), hi) {
            visitor.visit(max);
        }
    }
}

/// A mutating tree visitor.
pub trait BspVisitorMut<F> {
    /// Entry point for a node.
    fn visit_mut(&mut self, node: NodeMut<'_, F>) {
        self.visiting_mut(node);
    }

    /// Per-node work. The default only descends.
    fn visiting_mut(&mut self, node: NodeMut<'_, F>) {
        traverse_mut(self, node);
    }
}

/// Mutable counterpart of [`traverse`].
pub fn traverse_mut<F, V>(visitor: &mut V, mut node: NodeMut<'_, F>)
where
    V: BspVisitorMut<F> + ?Sized,
{
    if let Some(min) = node.min_child() {
        visitor.visit_mut(min);
    }
    if let Some(max) = node.max_child() {
        visitor.visit_mut(max);
    }
}

/// Mutable counterpart of [`traverse_within`].
pub fn traverse_mut_within<F, V>(visitor: &mut V, mut node: NodeMut<'_, F>, bounds: Rect)
where
    V: BspVisitorMut<F> + ?Sized,
{
    let (lo, hi) = node.axis().span(bounds);
    let split = node.split();
    if le(lo, split)
        && let Some(min) = node.min_child()
    {
        visitor.visit_mut(min);
    }
    if le(split, hi)
        && let Some(max) = node.max_child()
    {
        visitor.visit_mut(max);
    }
}
