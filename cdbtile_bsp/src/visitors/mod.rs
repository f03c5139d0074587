// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock visitors.
//!
//! - `rect`: footprints whose envelope intersects a query rectangle.
//! - `polygon`: point footprints inside a window polygon.
//! - `density`: point density of each populated leaf.
//! - `edit`: single-footprint insert and remove, and window removal of points.
//!
//! Range and polygon queries prune with the split rule of
//! [`traverse_within`](crate::visitor::traverse_within): the min child is
//! entered when the query starts at or before the split, the max child when
//! it ends at or after it.

pub mod density;
pub mod edit;
pub mod polygon;
pub mod rect;

pub use density::{DensityVisitor, LeafDensity};
pub use edit::{EditMode, EditVisitor};
pub use polygon::PolygonVisitor;
pub use rect::RectVisitor;
