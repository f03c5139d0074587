// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Cdbtile BSP: bulk-load, generate, query, edit.

use cdbtile_bsp::{Bsp, BspConfig, EditVisitor, Feature};
use kurbo::Rect;

fn main() {
    let mut bsp = Bsp::with_config(BspConfig {
        target_count: 1,
        ..Default::default()
    });
    bsp.add_geometry(Feature::rect(1, Rect::new(0.0, 0.0, 1.0, 1.0)));
    bsp.add_geometry(Feature::rect(2, Rect::new(5.0, 5.0, 6.0, 6.0)));
    bsp.add_geometry(Feature::rect(3, Rect::new(0.5, 0.5, 1.5, 1.5)));
    bsp.generate();
    println!(
        "nodes={} depth={}",
        bsp.node_count(),
        bsp.max_depth_reached()
    );

    let hits: Vec<_> = bsp
        .query_rect(Rect::new(0.0, 0.0, 2.0, 2.0))
        .iter()
        .map(|f| f.id.get())
        .collect();
    println!("hits in (0,0)-(2,2): {:?}", hits);

    // Remove footprint 3 and query again.
    let mut edit = EditVisitor::remove(&Feature::rect(3, Rect::new(0.5, 0.5, 1.5, 1.5)));
    bsp.accept_mut(&mut edit);
    println!("removed: {:?}", edit.take_removed().map(|f| f.id.get()));
    println!(
        "hits after removal: {}",
        bsp.query_rect(Rect::new(0.0, 0.0, 2.0, 2.0)).len()
    );
}
