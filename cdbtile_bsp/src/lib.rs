// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cdbtile_bsp --heading-base-level=0

//! Cdbtile BSP: an adaptive 2D binary space partition over footprint envelopes.
//!
//! Cdbtile BSP answers "which of these many footprints touch this rectangle"
//! without an all-pairs scan.
//!
//! - Bulk-load footprints, then [`Bsp::generate`] splits nodes alternately on
//!   X and Y at the midpoint of their content, bounded by [`BspConfig`].
//! - Footprints that straddle a split stay at that node, so nothing is
//!   duplicated and every footprint lives in exactly one node.
//! - Queries are visitors: [`RectVisitor`] (range), [`PolygonVisitor`]
//!   (points inside a window), [`DensityVisitor`] (per-leaf point density)
//!   and [`EditVisitor`] (insert and remove on a built tree).
//!
//! Footprints are anything implementing [`Footprint`]; [`Feature`] is a
//! ready-made point, line string or polygon. Envelopes are memoized by
//! [`FootprintId`] in a tree-wide [`EnvelopeCache`].
//!
//! # Example
//!
//! ```rust
//! use cdbtile_bsp::{Bsp, BspConfig, Feature, Polygon, PolygonVisitor};
//! use kurbo::Rect;
//!
//! let mut bsp = Bsp::with_config(BspConfig { target_count: 2, ..Default::default() });
//! bsp.add_geometry(Feature::rect(1, Rect::new(0.0, 0.0, 1.0, 1.0)));
//! bsp.add_geometry(Feature::point(2, 4.0, 4.0));
//! bsp.add_geometry(Feature::point(3, 9.0, 9.0));
//! bsp.generate();
//!
//! // Range query.
//! let hits = bsp.query_rect(Rect::new(0.5, 0.5, 5.0, 5.0));
//! assert_eq!(hits.len(), 2);
//!
//! // Points inside a window polygon.
//! let mut v = PolygonVisitor::new(Polygon::from_rect(Rect::new(3.0, 3.0, 10.0, 10.0)));
//! bsp.accept(&mut v);
//! assert_eq!(v.results().len(), 2);
//! ```
//!
//! Custom visitors override [`BspVisitor::visiting`] and hand back to
//! [`traverse`] or [`traverse_within`]:
//!
//! ```rust
//! use cdbtile_bsp::{Bsp, BspVisitor, Feature, NodeRef, traverse};
//!
//! struct Leaves(usize);
//!
//! impl<'a> BspVisitor<'a, Feature> for Leaves {
//!     fn visiting(&mut self, node: NodeRef<'a, Feature>) {
//!         if node.is_leaf() {
//!             self.0 += 1;
//!         }
//!         traverse(self, node);
//!     }
//! }
//!
//! let bsp: Bsp<Feature> = (0..4_u64).map(|i| Feature::point(i, 0.0, 0.0)).collect();
//! let mut leaves = Leaves(0);
//! bsp.accept(&mut leaves);
//! assert_eq!(leaves.0, 1);
//! ```
//!
//! ### Float semantics
//!
//! Footprints with a non-finite coordinate have no envelope: they are never
//! routed below the node they were added to and never match a query. Query
//! rectangles must be ordered and NaN-free; violating that panics.

#![no_std]

extern crate alloc;

pub mod bsp;
pub mod envelope;
pub mod footprint;
pub mod types;
pub mod visitor;
pub mod visitors;

pub use bsp::{Bsp, BspConfig, BspNode};
pub use envelope::{BuildContext, EnvelopeCache};
pub use footprint::{Feature, Footprint, Geometry, Polygon};
pub use types::{Axis, FootprintId, envelope_of, overlaps};
pub use visitor::{
    BspVisitor, BspVisitorMut, NodeMut, NodeRef, traverse, traverse_mut, traverse_mut_within,
    traverse_within,
};
pub use visitors::{
    DensityVisitor, EditMode, EditVisitor, LeafDensity, PolygonVisitor, RectVisitor,
};
