// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output tiles and their canonical paths.

use std::cmp::Ordering;
use std::fmt;

use crate::coordinates::{Coordinates, CoordinatesRange};
use crate::dataset::Dataset;
use crate::lod::Lod;

/// Latitude band token: `N`/`S` and two digits of `|ilat|`.
pub fn lat_token(ilat: i32) -> String {
    let hemi = if ilat < 0 { 'S' } else { 'N' };
    format!("{hemi}{:02}", ilat.unsigned_abs())
}

/// Longitude band token: `E`/`W` and three digits of `|ilon|`.
pub fn lon_token(ilon: i32) -> String {
    let hemi = if ilon < 0 { 'W' } else { 'E' };
    format!("{hemi}{:03}", ilon.unsigned_abs())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "geographic degrees are far inside i32"
)]
fn floor_deg(v: f64) -> i32 {
    v.floor() as i32
}

/// One output tile of the CDB lattice.
///
/// Equality and ordering look at the coordinates, level of detail, `uref`,
/// `rref` and component selectors; dataset and post spacing do not take part.
#[derive(Copy, Clone, Debug)]
pub struct Tile {
    coordinates: CoordinatesRange,
    dataset: Dataset,
    lod: Lod,
    uref: u32,
    rref: u32,
    cs1: u32,
    cs2: u32,
    post_space_x: f64,
    post_space_y: f64,
}

impl Tile {
    /// Create a tile with component selectors `1`/`1` and no post spacing.
    pub fn new(
        coordinates: CoordinatesRange,
        dataset: Dataset,
        lod: Lod,
        uref: u32,
        rref: u32,
    ) -> Self {
        Self {
            coordinates,
            dataset,
            lod,
            uref,
            rref,
            cs1: 1,
            cs2: 1,
            post_space_x: 0.0,
            post_space_y: 0.0,
        }
    }

    /// Replace the component selectors.
    #[must_use]
    pub fn with_selectors(mut self, cs1: u32, cs2: u32) -> Self {
        self.cs1 = cs1;
        self.cs2 = cs2;
        self
    }

    /// Set the post spacing, in degrees.
    #[must_use]
    pub fn with_post_spacing(mut self, x: f64, y: f64) -> Self {
        self.post_space_x = x;
        self.post_space_y = y;
        self
    }

    /// Geographic extent.
    pub fn coordinates(&self) -> &CoordinatesRange {
        &self.coordinates
    }

    /// Dataset.
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Level of detail.
    pub fn lod(&self) -> Lod {
        self.lod
    }

    /// Row index within the geocell, counted from the south.
    pub fn uref(&self) -> u32 {
        self.uref
    }

    /// Column index within the geocell, counted from the west.
    pub fn rref(&self) -> u32 {
        self.rref
    }

    /// First component selector.
    pub fn cs1(&self) -> u32 {
        self.cs1
    }

    /// Second component selector.
    pub fn cs2(&self) -> u32 {
        self.cs2
    }

    /// Degrees of longitude between posts.
    pub fn post_space_x(&self) -> f64 {
        self.post_space_x
    }

    /// Degrees of latitude between posts.
    pub fn post_space_y(&self) -> f64 {
        self.post_space_y
    }

    /// Centre of the tile.
    pub fn center(&self) -> Coordinates {
        let c = &self.coordinates;
        Coordinates::new(
            c.south() + c.height() / 2.0,
            c.west() + c.width() / 2.0,
        )
    }

    fn bands(&self) -> (String, String) {
        (
            lat_token(floor_deg(self.coordinates.south())),
            lon_token(floor_deg(self.coordinates.west())),
        )
    }

    /// Directory part of the canonical path:
    /// `Tiles/<Lat>/<Lon>/<DDD>_<Name>/<LOD>/U<uref>`.
    pub fn path(&self) -> String {
        let (lat, lon) = self.bands();
        format!(
            "Tiles/{lat}/{lon}/{:03}_{}/{}/U{}",
            self.dataset.code(),
            self.dataset.name(),
            self.lod,
            self.uref
        )
    }

    /// File name part of the canonical path:
    /// `<Lat><Lon>_D<DDD>_S<SSS>_T<TTT>_<LOD>_U<uref>_R<rref>.jp2`.
    pub fn file_name(&self) -> String {
        let (lat, lon) = self.bands();
        format!(
            "{lat}{lon}_D{:03}_S{:03}_T{:03}_{}_U{}_R{}.jp2",
            self.dataset.code(),
            self.cs1,
            self.cs2,
            self.lod,
            self.uref,
            self.rref
        )
    }

    /// Full relative path, `/`-separated.
    pub fn canonical_path(&self) -> String {
        format!("{}/{}", self.path(), self.file_name())
    }

    fn key_cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.coordinates, &other.coordinates);
        a.south()
            .total_cmp(&b.south())
            .then(a.west().total_cmp(&b.west()))
            .then(a.north().total_cmp(&b.north()))
            .then(a.east().total_cmp(&b.east()))
            .then(self.lod.cmp(&other.lod))
            .then(self.uref.cmp(&other.uref))
            .then(self.rref.cmp(&other.rref))
            .then(self.cs1.cmp(&other.cs1))
            .then(self.cs2.cmp(&other.cs2))
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Tile {}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.path(), self.file_name())
    }
}
