// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render job planning.
//!
//! Lay out a block of mesh tiles in an East-North-Up frame, bind them to the
//! CDB tiles of one level of detail and print the dry-run listing.
//!
//! Run:
//! - `cargo run -p cdbtile_demos --example render_jobs`

use cdbtile_grid::{Dataset, Lod};
use cdbtile_jobs::{
    BindOptions, BinderSettings, EllipsoidTangentPlane, InputFootprint, TileJobBinder,
};

fn main() -> Result<(), cdbtile_jobs::JobError> {
    let origin = EllipsoidTangentPlane::new(45.98, 7.02);

    // A 4x4 block of 1 km mesh tiles, each at two LODs in its own directory.
    let mut inputs = Vec::new();
    for row in 0..4 {
        for col in 0..4 {
            let x = f64::from(col) * 1000.0 - 2000.0;
            let y = f64::from(row) * 1000.0 - 2000.0;
            for lod in [14, 16] {
                let path = format!("meshes/r{row}c{col}/tile_L{lod}.obj");
                inputs.push(InputFootprint::new(x, y, x + 1000.0, y + 1000.0, path));
            }
        }
    }

    let settings =
        BinderSettings::new("cdb").with_options(BindOptions::HIGHEST_LOD_ONLY | BindOptions::OBJ_ONLY);
    let binder = TileJobBinder::bind(origin, settings, inputs)?;
    println!("indexed {} inputs", binder.input_count());
    if let Some(geo) = binder.geographic_extent() {
        println!(
            "database extent: {:.4},{:.4} .. {:.4},{:.4}",
            geo.south(),
            geo.west(),
            geo.north(),
            geo.east()
        );
    }

    let jobs = binder.collect_render_jobs(Dataset::Imagery, Lod::new(3));
    println!("{} jobs", jobs.len());
    for job in &jobs {
        println!("{job}");
    }
    Ok(())
}
