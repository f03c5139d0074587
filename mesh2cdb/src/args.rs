// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use clap::Parser;

/// Plan CDB render jobs for a set of geo-referenced OBJ meshes.
///
/// Reads the meshes named by the configuration file, measures their extents
/// in the local East-North-Up frame, and binds every CDB tile of the
/// requested level of detail to the meshes that overlap it.
#[derive(Parser, Debug, Clone)]
#[command(name = "mesh2cdb", version, about, long_about = None)]
pub(crate) struct Args {
    /// JSON configuration file.
    #[arg(long)]
    pub(crate) config: PathBuf,

    /// Output CDB root, overriding the configuration file.
    #[arg(long)]
    pub(crate) cdb: Option<PathBuf>,

    /// Level of detail to plan, overriding the configuration file.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) lod: Option<i32>,

    /// List the jobs without touching the output directory.
    #[arg(long, default_value_t = false)]
    pub(crate) dry_run: bool,

    /// Also write the job list as JSON to this path.
    #[arg(long)]
    pub(crate) manifest: Option<PathBuf>,

    /// Drop jobs whose output file already exists.
    #[arg(long, default_value_t = false)]
    pub(crate) skip_existing: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, default_value_t = false)]
    pub(crate) verbose: bool,
}
