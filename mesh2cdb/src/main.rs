// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `mesh2cdb`: plan CDB tile render jobs for geo-referenced OBJ meshes.
//!
//! Reads a JSON configuration, measures every selected mesh in the East-North-Up
//! frame around the configured origin, and binds the CDB tiles of one level of
//! detail to the meshes that overlap them. A dry run lists the jobs; otherwise
//! the CDB root gets its version metadata and tile directories. Either way the
//! job list can be written as a JSON manifest.

mod args;
mod config;
mod logging;
mod obj;
mod output;

use std::fs;

use anyhow::{Context, Result};
use cdbtile_grid::Lod;
use cdbtile_jobs::{
    BindOptions, BinderSettings, EllipsoidTangentPlane, RenderJob, TileJobBinder, select_inputs,
};
use clap::Parser;
use tracing::info;

use crate::args::Args;
use crate::config::Config;

fn bind_options(config: &Config) -> BindOptions {
    let mut options = BindOptions::OBJ_ONLY;
    if config.highest_lod_only {
        options |= BindOptions::HIGHEST_LOD_ONLY;
    }
    options
}

/// Measure the configured sources and bind them to tiles.
fn plan(config: &Config) -> Result<Vec<RenderJob>> {
    let options = bind_options(config);
    let candidates = obj::collect_sources(&config.sources);
    let found = candidates.len();
    let selected = select_inputs(candidates, options);
    info!(found, selected = selected.len(), "collected source files");

    let inputs: Vec<_> = selected
        .iter()
        .filter_map(|path| obj::measure(path, config.offset))
        .collect();

    let projector = EllipsoidTangentPlane::new(config.origin.lat, config.origin.lon);
    let settings = BinderSettings {
        options,
        bsp: config.bsp.into(),
        output_root: config.output_dir.clone(),
    };
    let binder = TileJobBinder::bind(projector, settings, inputs)
        .context("no source mesh could be measured")?;

    let dataset = config.dataset()?;
    let lod = Lod::new(config.max_lod);
    let jobs = binder.collect_render_jobs(dataset, lod);
    info!("rendering {} CDB {} tiles at {}", jobs.len(), dataset, lod);
    Ok(jobs)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = Config::load(&args.config)?;
    if let Some(cdb) = &args.cdb {
        config.output_dir.clone_from(cdb);
    }
    if let Some(lod) = args.lod {
        config.max_lod = lod;
    }
    config.validate().context("invalid configuration")?;

    let mut jobs = plan(&config)?;
    if args.skip_existing {
        let before = jobs.len();
        jobs = output::without_existing(jobs);
        info!(skipped = before - jobs.len(), "dropped jobs with existing output");
    }

    if args.dry_run {
        for job in &jobs {
            println!("{job}");
        }
    } else {
        output::ensure_version_metadata(&config.output_dir).with_context(|| {
            format!(
                "failed to write metadata under {}",
                config.output_dir.display()
            )
        })?;
        output::create_tile_dirs(&jobs).context("failed to create tile directories")?;
    }

    if let Some(path) = &args.manifest {
        let json = output::manifest_json(&jobs).context("failed to serialize manifest")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        info!(path = %path.display(), jobs = jobs.len(), "wrote job manifest");
    }
    Ok(())
}
