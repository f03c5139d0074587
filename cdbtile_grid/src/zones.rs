// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latitude-dependent geocell widths.
//!
//! Geocells shrink in ground width towards the poles, so CDB widens them in
//! longitude by zone. Zones are symmetric about the equator and keyed by the
//! edge of the one-degree band nearest the equator.

/// Zone table: `(first edge, last edge, width in degrees)`.
pub const ZONES: [(u8, u8, u8); 6] = [
    (0, 49, 1),
    (50, 69, 2),
    (70, 74, 3),
    (75, 79, 4),
    (80, 88, 6),
    (89, 89, 12),
];

/// Longitude width, in whole degrees, of the geocells in the one-degree
/// latitude band whose south edge is `ilat`.
///
/// Bands outside `[-90, 90)` take the polar width.
pub fn tile_width(ilat: i32) -> u8 {
    // The equator-side edge of band [ilat, ilat + 1].
    let edge = if ilat >= 0 { ilat } else { -(ilat + 1) };
    ZONES
        .iter()
        .find(|(first, last, _)| (i32::from(*first)..=i32::from(*last)).contains(&edge))
        .map_or(12, |(_, _, width)| *width)
}
