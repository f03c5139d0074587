// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Footprint abstraction and the provided planar geometry types.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::{FootprintId, envelope_of};

/// A 2D outline the index can partition.
///
/// The index only needs an identity, an exterior boundary to derive an envelope
/// from, and, for polygon-bounded queries, a way to recognise point footprints.
pub trait Footprint {
    /// Stable identifier used for identity comparison and envelope caching.
    fn id(&self) -> FootprintId;

    /// Ordered exterior boundary coordinates.
    fn boundary(&self) -> &[Point];

    /// The coordinate of a point-typed footprint, `None` for anything else.
    fn as_point(&self) -> Option<Point>;

    /// The footprint's envelope, or `None` when it is malformed.
    ///
    /// The default derives the envelope from [`boundary`](Self::boundary).
    fn envelope(&self) -> Option<Rect> {
        envelope_of(self.boundary())
    }
}

/// A simple polygon given by its exterior ring.
///
/// The ring may be given open or closed (first point repeated at the end).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    exterior: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its exterior ring.
    pub fn new(exterior: impl Into<Vec<Point>>) -> Self {
        Self {
            exterior: exterior.into(),
        }
    }

    /// A closed rectangular ring `(x0, y0) → (x1, y0) → (x1, y1) → (x0, y1) → (x0, y0)`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new([
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x0, rect.y0),
        ])
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    /// Envelope of the ring; `None` for fewer than three ring points or
    /// non-finite coordinates.
    pub fn envelope(&self) -> Option<Rect> {
        if self.exterior.len() < 3 {
            return None;
        }
        envelope_of(&self.exterior)
    }

    /// Point-in-polygon test. Points on the boundary are inside.
    pub fn contains(&self, pt: Point) -> bool {
        let ring = &self.exterior;
        if ring.len() < 3 || !pt.is_finite() {
            return false;
        }
        let mut inside = false;
        let mut prev = ring[ring.len() - 1];
        for &cur in ring {
            if on_segment(prev, cur, pt) {
                return true;
            }
            // Crossing number: count edges straddling the horizontal ray to +X.
            if (cur.y > pt.y) != (prev.y > pt.y) {
                let t = (pt.y - cur.y) / (prev.y - cur.y);
                let x = cur.x + t * (prev.x - cur.x);
                if pt.x < x {
                    inside = !inside;
                }
            }
            prev = cur;
        }
        inside
    }
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross != 0.0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Planar geometry carried by a [`Feature`].
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single coordinate.
    Point(Point),
    /// An open polyline; needs at least two points to be well formed.
    LineString(Vec<Point>),
    /// A polygon; needs at least three ring points to be well formed.
    Polygon(Polygon),
}

/// A geometry tagged with a caller-assigned [`FootprintId`].
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Identity inside the index.
    pub id: FootprintId,
    /// The footprint outline.
    pub geometry: Geometry,
}

impl Feature {
    /// Create a feature.
    pub fn new(id: impl Into<FootprintId>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }

    /// A point feature.
    pub fn point(id: impl Into<FootprintId>, x: f64, y: f64) -> Self {
        Self::new(id, Geometry::Point(Point::new(x, y)))
    }

    /// A rectangular polygon feature covering `rect`.
    pub fn rect(id: impl Into<FootprintId>, rect: Rect) -> Self {
        Self::new(id, Geometry::Polygon(Polygon::from_rect(rect)))
    }
}

impl Footprint for Feature {
    fn id(&self) -> FootprintId {
        self.id
    }

    fn boundary(&self) -> &[Point] {
        match &self.geometry {
            Geometry::Point(pt) => core::slice::from_ref(pt),
            Geometry::LineString(points) => points,
            Geometry::Polygon(poly) => poly.exterior(),
        }
    }

    fn as_point(&self) -> Option<Point> {
        match self.geometry {
            Geometry::Point(pt) => Some(pt),
            _ => None,
        }
    }

    fn envelope(&self) -> Option<Rect> {
        match &self.geometry {
            Geometry::Point(pt) => envelope_of(core::slice::from_ref(pt)),
            Geometry::LineString(points) if points.len() >= 2 => envelope_of(points),
            Geometry::LineString(_) => None,
            Geometry::Polygon(poly) => poly.envelope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn square() -> Polygon {
        Polygon::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn contains_interior_boundary_and_exterior() {
        let sq = square();
        assert!(sq.contains(Point::new(5.0, 5.0)));
        assert!(sq.contains(Point::new(0.0, 5.0)), "edge is inside");
        assert!(sq.contains(Point::new(10.0, 10.0)), "corner is inside");
        assert!(!sq.contains(Point::new(10.5, 5.0)));
        assert!(!sq.contains(Point::new(-0.1, -0.1)));
    }

    #[test]
    fn contains_concave_ring() {
        // A "U" shape opening upwards.
        let u = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(0.0, 3.0),
        ]);
        assert!(u.contains(Point::new(0.5, 2.0)));
        assert!(u.contains(Point::new(2.5, 2.0)));
        assert!(!u.contains(Point::new(1.5, 2.0)), "notch is outside");
    }

    #[test]
    fn degenerate_rings_have_no_envelope() {
        let two = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(two.envelope(), None);
        assert!(!two.contains(Point::new(0.5, 0.5)));
        let line = Feature::new(1, Geometry::LineString(vec![Point::new(0.0, 0.0)]));
        assert_eq!(line.envelope(), None);
    }

    #[test]
    fn feature_envelopes() {
        let p = Feature::point(1, 3.0, 4.0);
        assert_eq!(p.envelope(), Some(Rect::new(3.0, 4.0, 3.0, 4.0)));
        assert_eq!(p.as_point(), Some(Point::new(3.0, 4.0)));

        let r = Feature::rect(2, Rect::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(r.envelope(), Some(Rect::new(0.0, 1.0, 2.0, 3.0)));
        assert_eq!(r.as_point(), None);
        assert_eq!(r.boundary().len(), 5);
    }
}
