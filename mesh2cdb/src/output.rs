// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Everything the planner writes: CDB metadata, tile directories and the
//! JSON job manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cdbtile_jobs::RenderJob;
use serde::Serialize;
use tracing::{debug, info};

const VERSION_XML: &str = "<?xml version = \"1.0\"?>
<Version xmlns:xsi = \"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">
<PreviousIncrementalRootDirectory name = \"\" />
<Comment>Created by mesh2cdb</Comment>
</Version>
";

/// Create `<root>/Metadata/Version.xml` unless `<root>/Metadata` exists.
///
/// Returns whether anything was written.
pub(crate) fn ensure_version_metadata(root: &Path) -> io::Result<bool> {
    let metadata = root.join("Metadata");
    if metadata.exists() {
        return Ok(false);
    }
    fs::create_dir_all(&metadata)?;
    fs::write(metadata.join("Version.xml"), VERSION_XML)?;
    info!(path = %metadata.display(), "wrote CDB version metadata");
    Ok(true)
}

/// Create the directory each job's output file will land in.
pub(crate) fn create_tile_dirs(jobs: &[RenderJob]) -> io::Result<()> {
    for job in jobs {
        if let Some(dir) = job.output_path().parent() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

/// Drop jobs whose output file is already on disk.
pub(crate) fn without_existing(jobs: Vec<RenderJob>) -> Vec<RenderJob> {
    jobs.into_iter()
        .filter(|job| {
            let exists = job.output_path().exists();
            if exists {
                debug!(path = %job.output_path().display(), "already exists, skipping");
            }
            !exists
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    tile: String,
    lod: i8,
    uref: u32,
    rref: u32,
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    enu_min_x: f64,
    enu_min_y: f64,
    enu_max_x: f64,
    enu_max_y: f64,
    output: PathBuf,
    inputs: Vec<PathBuf>,
}

impl From<&RenderJob> for ManifestEntry {
    fn from(job: &RenderJob) -> Self {
        let tile = job.tile();
        let c = tile.coordinates();
        let e = job.local_extent();
        Self {
            tile: tile.canonical_path(),
            lod: tile.lod().value(),
            uref: tile.uref(),
            rref: tile.rref(),
            south: c.south(),
            west: c.west(),
            north: c.north(),
            east: c.east(),
            enu_min_x: e.x0,
            enu_min_y: e.y0,
            enu_max_x: e.x1,
            enu_max_y: e.y1,
            output: job.output_path().to_path_buf(),
            inputs: job.inputs().to_vec(),
        }
    }
}

/// The jobs as a pretty-printed JSON array.
pub(crate) fn manifest_json(jobs: &[RenderJob]) -> serde_json::Result<String> {
    let entries: Vec<ManifestEntry> = jobs.iter().map(ManifestEntry::from).collect();
    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdbtile_grid::{CoordinatesRange, Dataset, Lod, Tile};
    use kurbo::Rect;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mesh2cdb-out-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn job_under(root: &Path) -> RenderJob {
        let tile = Tile::new(
            CoordinatesRange::from_bounds(7.0, 8.0, 45.0, 46.0),
            Dataset::Imagery,
            Lod::new(0),
            0,
            0,
        );
        RenderJob::new(
            tile,
            Rect::new(-10.0, -20.0, 30.0, 40.0),
            root.join(tile.canonical_path()),
            vec![PathBuf::from("m.obj")],
        )
    }

    #[test]
    fn version_metadata_written_once() {
        let root = scratch("version");
        assert!(ensure_version_metadata(&root).unwrap());
        let text = fs::read_to_string(root.join("Metadata/Version.xml")).unwrap();
        assert!(text.starts_with("<?xml version = \"1.0\"?>\n<Version "));
        assert!(text.contains("<Comment>Created by mesh2cdb</Comment>"));
        assert!(!ensure_version_metadata(&root).unwrap());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn existing_outputs_are_skipped() {
        let root = scratch("skip");
        let jobs = vec![job_under(&root)];
        create_tile_dirs(&jobs).unwrap();
        assert!(jobs[0].output_path().parent().unwrap().is_dir());
        assert_eq!(without_existing(jobs.clone()).len(), 1);

        fs::write(jobs[0].output_path(), b"").unwrap();
        assert!(without_existing(jobs).is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn manifest_shape() {
        let jobs = vec![job_under(Path::new("cdb"))];
        let value: serde_json::Value = serde_json::from_str(&manifest_json(&jobs).unwrap()).unwrap();
        let entry = &value[0];
        assert_eq!(
            entry["tile"],
            "Tiles/N45/E007/004_Imagery/L00/U0/N45E007_D004_S001_T001_L00_U0_R0.jp2"
        );
        assert_eq!(entry["lod"], 0);
        assert_eq!(entry["enu_max_y"], 40.0);
        assert_eq!(entry["inputs"][0], "m.obj");
    }
}
