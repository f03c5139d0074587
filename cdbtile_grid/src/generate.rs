// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enumerating the tiles that cover a region.

use std::ops::Range;

use crate::coordinates::CoordinatesRange;
use crate::dataset::Dataset;
use crate::lod::Lod;
use crate::tile::Tile;
use crate::zones::tile_width;

#[allow(
    clippy::cast_possible_truncation,
    reason = "geographic degrees are far inside i32"
)]
fn deg(v: f64) -> i32 {
    v as i32
}

/// Indices `k` in `[0, count)` whose cell `[k * step, (k + 1) * step)` can
/// overlap `(lo, hi)`, widened by one on each side; callers re-check exactly.
fn candidates(lo: f64, hi: f64, step: f64, count: u32) -> Range<u32> {
    let start = ((lo / step).floor() - 1.0).max(0.0);
    let end = ((hi / step).ceil() + 1.0).min(f64::from(count));
    if end <= start {
        return 0..0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped into [0, count]"
    )]
    let range = (start as u32)..(end as u32);
    range
}

/// Whether the cell `[a, b)` takes part in the span `(lo, hi)`. A zero-width
/// span belongs to the cell that contains it.
fn touches(a: f64, b: f64, lo: f64, hi: f64) -> bool {
    if lo == hi {
        a <= lo && lo < b
    } else {
        a < hi && b > lo
    }
}

/// Every tile of `dataset` at `lod` that overlaps `bounds`.
///
/// Rows are one degree of latitude split into [`Lod::rows`] tiles. Columns are
/// geocells of [`tile_width`] degrees, aligned to multiples of that width, each
/// split into [`Lod::cols`] tiles. A tile is emitted when it overlaps `bounds`
/// with non-zero area, so a region whose edges lie on tile edges gets no
/// neighbours. A region that is a point or a line yields the tiles containing
/// it, taking the tile to the north or east of an edge it lies on. Output is ordered by latitude band, geocell, `uref`, `rref`.
pub fn generate_tiles(bounds: &CoordinatesRange, dataset: Dataset, lod: Lod) -> Vec<Tile> {
    let (south, north) = (bounds.south(), bounds.north());
    let (west, east) = (bounds.west(), bounds.east());
    let isouth = deg(south.floor());
    let inorth = deg(north.ceil());
    let iwest = deg(west.floor());
    let ieast = deg(east.ceil());

    let rows = lod.rows();
    let cols = lod.cols();
    let row_height = 1.0 / f64::from(rows);

    let mut tiles = Vec::new();
    for ilat in isouth..=inorth {
        let base_lat = f64::from(ilat);
        let urefs = candidates(south - base_lat, north - base_lat, row_height, rows);
        if urefs.is_empty() {
            continue;
        }
        let width = i32::from(tile_width(ilat));
        let col_width = f64::from(width) / f64::from(cols);

        let mut ilon = iwest.div_euclid(width) * width;
        while ilon <= ieast {
            let base_lon = f64::from(ilon);
            let rrefs = candidates(west - base_lon, east - base_lon, col_width, cols);
            for uref in urefs.clone() {
                let tile_south = base_lat + row_height * f64::from(uref);
                let tile_north = base_lat + row_height * f64::from(uref + 1);
                if !touches(tile_south, tile_north, south, north) {
                    continue;
                }
                for rref in rrefs.clone() {
                    let tile_west = base_lon + col_width * f64::from(rref);
                    let tile_east = base_lon + col_width * f64::from(rref + 1);
                    if !touches(tile_west, tile_east, west, east) {
                        continue;
                    }
                    let extent =
                        CoordinatesRange::from_bounds(tile_west, tile_east, tile_south, tile_north);
                    tiles.push(
                        Tile::new(extent, dataset, lod, uref, rref)
                            .with_post_spacing(col_width / 1024.0, row_height / 1024.0),
                    );
                }
            }
            ilon += width;
        }
    }
    tiles
}
