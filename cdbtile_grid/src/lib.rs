// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cdbtile_grid --heading-base-level=0

//! Cdbtile Grid: the CDB geodetic tile lattice.
//!
//! A CDB database stores content in one-degree latitude bands. Each band is
//! cut into geocells whose longitude width grows towards the poles
//! ([`tile_width`]), and each geocell is cut into `2^lod` rows and columns of
//! tiles at a given [`Lod`]. Every tile has a canonical relative path derived
//! only from its position, [`Dataset`], level and component selectors.
//!
//! - [`generate_tiles`] enumerates the tiles overlapping a region.
//! - [`Tile::canonical_path`] names a tile's file.
//!
//! # Example
//!
//! ```rust
//! use cdbtile_grid::{CoordinatesRange, Dataset, Lod, generate_tiles};
//!
//! let region = CoordinatesRange::from_bounds(-1.0, 1.0, -1.0, 1.0);
//! let tiles = generate_tiles(&region, Dataset::Elevation, Lod::new(0));
//! assert_eq!(tiles.len(), 4);
//! assert_eq!(
//!     tiles[0].canonical_path(),
//!     "Tiles/S01/W001/001_Elevation/L00/U0/S01W001_D001_S001_T001_L00_U0_R0.jp2",
//! );
//! ```

pub mod coordinates;
pub mod dataset;
pub mod generate;
pub mod lod;
pub mod tile;
pub mod zones;

pub use coordinates::{Coordinates, CoordinatesRange};
pub use dataset::{Dataset, ParseDatasetError};
pub use generate::generate_tiles;
pub use lod::Lod;
pub use tile::Tile;
pub use zones::tile_width;
