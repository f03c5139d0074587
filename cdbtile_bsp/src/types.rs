// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive types and envelope helpers.

use core::cmp::Ordering;

use kurbo::{Point, Rect};

/// Caller-assigned stable identifier of a footprint.
///
/// The index never interprets the value; it only compares ids for identity and
/// uses them as envelope cache keys. Ids must be unique among the footprints
/// held by one tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FootprintId(u64);

impl FootprintId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for FootprintId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Orientation of a node's split line.
///
/// A `Vertical` node splits on X (the split is a vertical line), a `Horizontal`
/// node splits on Y.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Split on X.
    #[default]
    Vertical,
    /// Split on Y.
    Horizontal,
}

impl Axis {
    /// The axis used by the children of a node split on `self`.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// The `(min, max)` extent of `rect` along this axis.
    #[inline]
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.x0, rect.x1),
            Self::Horizontal => (rect.y0, rect.y1),
        }
    }

    /// The coordinate of `pt` along this axis.
    #[inline]
    pub fn coord(self, pt: Point) -> f64 {
        match self {
            Self::Vertical => pt.x,
            Self::Horizontal => pt.y,
        }
    }
}

/// Envelope of a run of coordinates.
///
/// Returns `None` for an empty run or when any coordinate is not finite.
/// A single point yields a zero-area envelope.
pub fn envelope_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    if !first.is_finite() {
        return None;
    }
    let mut env = Rect::from_points(*first, *first);
    for pt in rest {
        if !pt.is_finite() {
            return None;
        }
        env = env.union_pt(*pt);
    }
    Some(env)
}

/// Closed-interval overlap test of two envelopes.
///
/// Touching edges count as overlapping, which is what tile binding needs: an
/// input that ends exactly on a tile edge still contributes to that tile.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    le(a.x0, b.x1) && le(b.x0, a.x1) && le(a.y0, b.y1) && le(b.y0, a.y1)
}

/// Whether `rect` is ordered (`x0 <= x1`, `y0 <= y1`) with no NaN.
#[inline]
pub fn is_ordered(rect: &Rect) -> bool {
    le(rect.x0, rect.x1) && le(rect.y0, rect.y1)
}

pub(crate) fn union_opt(acc: Option<Rect>, env: Rect) -> Option<Rect> {
    Some(match acc {
        Some(acc) => acc.union(env),
        None => env,
    })
}

pub(crate) fn le(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}
