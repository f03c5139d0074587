// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cdbtile_jobs --heading-base-level=0

//! Cdbtile Jobs: binding CDB output tiles to geo-referenced inputs.
//!
//! Inputs arrive as rectangular extents in a local Cartesian frame, usually
//! an East-North-Up tangent plane around a survey origin. The
//! [`TileJobBinder`] indexes them in a [`cdbtile_bsp::Bsp`], works out the
//! database's geographic extent, enumerates the CDB tiles covering it with
//! [`cdbtile_grid::generate_tiles`] and emits one [`RenderJob`] per tile that
//! at least one input touches.
//!
//! - [`LocalProjector`] converts between geodetic and local coordinates;
//!   [`EllipsoidTangentPlane`] and [`IdentityProjector`] are provided.
//! - [`BindOptions`] selects inputs before indexing: `.obj` files only, or
//!   the highest LOD of each source directory.
//!
//! # Example
//!
//! ```rust
//! use cdbtile_grid::{Dataset, Lod};
//! use cdbtile_jobs::{BinderSettings, IdentityProjector, InputFootprint, TileJobBinder};
//!
//! let inputs = vec![
//!     InputFootprint::new(0.1, 0.1, 0.4, 0.4, "west.obj"),
//!     InputFootprint::new(1.2, 0.2, 1.6, 0.7, "east.obj"),
//! ];
//! let binder = TileJobBinder::bind(IdentityProjector, BinderSettings::new("cdb"), inputs)?;
//! let jobs = binder.collect_render_jobs(Dataset::Imagery, Lod::new(0));
//! assert_eq!(jobs.len(), 2);
//! assert!(jobs[0].output_path().starts_with("cdb/Tiles/N00/E000"));
//! # Ok::<(), cdbtile_jobs::JobError>(())
//! ```

mod error;

pub mod binder;
pub mod job;
pub mod options;
pub mod projection;
pub mod source;

pub use binder::TileJobBinder;
pub use error::JobError;
pub use job::RenderJob;
pub use options::{BindOptions, BinderSettings};
pub use projection::{EllipsoidTangentPlane, IdentityProjector, LocalProjector};
pub use source::{InputFootprint, InputSource, lod_from_filename, select_inputs};
