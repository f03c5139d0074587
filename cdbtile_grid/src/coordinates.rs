// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic coordinates and ranges, in degrees.

/// A geographic position.
///
/// Ordering is field-wise: latitude first, then longitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Coordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Coordinates {
    /// Create a position.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A latitude/longitude box given by its south-west (`low`) and north-east
/// (`high`) corners.
///
/// Ordering is field-wise: `low`, then `high`.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct CoordinatesRange {
    low: Coordinates,
    high: Coordinates,
}

impl CoordinatesRange {
    /// Create a range from its corners.
    ///
    /// # Panics
    ///
    /// If a coordinate is not finite or `low` lies north or east of `high`.
    #[track_caller]
    pub fn new(low: Coordinates, high: Coordinates) -> Self {
        assert!(
            low.is_finite() && high.is_finite(),
            "coordinate range must be finite, got {low:?}..{high:?}"
        );
        assert!(
            low.latitude <= high.latitude && low.longitude <= high.longitude,
            "coordinate range is inverted: {low:?}..{high:?}"
        );
        Self { low, high }
    }

    /// Create a range from its edges.
    ///
    /// # Panics
    ///
    /// Same as [`new`](Self::new).
    #[track_caller]
    pub fn from_bounds(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self::new(Coordinates::new(south, west), Coordinates::new(north, east))
    }

    /// South-west corner.
    pub fn low(&self) -> Coordinates {
        self.low
    }

    /// North-east corner.
    pub fn high(&self) -> Coordinates {
        self.high
    }

    /// Southern edge.
    pub fn south(&self) -> f64 {
        self.low.latitude
    }

    /// Northern edge.
    pub fn north(&self) -> f64 {
        self.high.latitude
    }

    /// Western edge.
    pub fn west(&self) -> f64 {
        self.low.longitude
    }

    /// Eastern edge.
    pub fn east(&self) -> f64 {
        self.high.longitude
    }

    /// Extent in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east() - self.west()
    }

    /// Extent in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north() - self.south()
    }

    /// The four corners, counter-clockwise from south-west.
    pub fn corners(&self) -> [Coordinates; 4] {
        [
            self.low,
            Coordinates::new(self.south(), self.east()),
            self.high,
            Coordinates::new(self.north(), self.west()),
        ]
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            low: Coordinates::new(
                self.south().min(other.south()),
                self.west().min(other.west()),
            ),
            high: Coordinates::new(
                self.north().max(other.north()),
                self.east().max(other.east()),
            ),
        }
    }

    /// Smallest range covering `points`, or `None` if there are none or any
    /// is not finite.
    pub fn bounding(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        let mut acc: Option<Self> = None;
        for p in points {
            if !p.is_finite() {
                return None;
            }
            let single = Self { low: p, high: p };
            acc = Some(match acc {
                Some(acc) => acc.union(&single),
                None => single,
            });
        }
        acc
    }
}
