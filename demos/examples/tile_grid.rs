// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CDB tile grid.
//!
//! Enumerate the tiles covering a region at a few levels of detail, including
//! a polar region where geocells are wider than one degree.
//!
//! Run:
//! - `cargo run -p cdbtile_demos --example tile_grid`

use cdbtile_grid::{CoordinatesRange, Dataset, Lod, generate_tiles, tile_width};

fn main() {
    let region = CoordinatesRange::from_bounds(7.2, 7.8, 45.2, 45.6);
    for lod in [-2, 0, 2, 4] {
        let lod = Lod::new(lod);
        let tiles = generate_tiles(&region, Dataset::Imagery, lod);
        println!(
            "{lod}: {} tiles, {}x{} per geocell, {} posts per edge",
            tiles.len(),
            lod.rows(),
            lod.cols(),
            lod.dimensions()
        );
        if let Some(first) = tiles.first() {
            println!("  first: {}", first.canonical_path());
        }
    }

    for lat in [0, 50, 70, 75, 80, 89, -90] {
        println!("geocell width at {lat:>3}: {} deg", tile_width(lat));
    }

    let polar = CoordinatesRange::from_bounds(-10.0, 10.0, 80.5, 81.5);
    for tile in generate_tiles(&polar, Dataset::Elevation, Lod::new(0)) {
        let c = tile.coordinates();
        println!(
            "{:>8.3}..{:<8.3} {:>7.3}..{:<7.3} {}",
            c.west(),
            c.east(),
            c.south(),
            c.north(),
            tile.file_name()
        );
    }
}
