// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finding OBJ files and measuring their vertex extents.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use cdbtile_jobs::InputFootprint;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{Offset, Sources};

/// Axis-aligned bounds of every `v` record of an OBJ file, offset applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ObjExtent {
    pub(crate) min: [f64; 3],
    pub(crate) max: [f64; 3],
}

impl ObjExtent {
    fn point(p: [f64; 3]) -> Self {
        Self { min: p, max: p }
    }

    fn add(&mut self, p: [f64; 3]) {
        for k in 0..3 {
            self.min[k] = self.min[k].min(p[k]);
            self.max[k] = self.max[k].max(p[k]);
        }
    }
}

fn parse_vertex(rest: &str) -> Option<[f64; 3]> {
    let mut it = rest.split_whitespace().map(str::parse::<f64>);
    let x = it.next()?.ok()?;
    let y = it.next()?.ok()?;
    // A missing z is taken as zero.
    let z = match it.next() {
        Some(z) => z.ok()?,
        None => 0.0,
    };
    Some([x, y, z])
}

/// Scan `reader` for geometric vertices.
///
/// Only lines starting with `v ` count; normals, texture coordinates and
/// faces are ignored, as are vertex lines that fail to parse. Returns `None`
/// when no vertex was found.
pub(crate) fn scan_extent(reader: impl BufRead, offset: Offset) -> io::Result<Option<ObjExtent>> {
    let mut extent: Option<ObjExtent> = None;
    for line in reader.lines() {
        let line = line?;
        let Some(rest) = line.strip_prefix("v ").or_else(|| line.strip_prefix("v\t")) else {
            continue;
        };
        let Some([x, y, z]) = parse_vertex(rest) else {
            continue;
        };
        let p = [x + offset.x, y + offset.y, z + offset.z];
        extent = Some(match extent {
            Some(mut e) => {
                e.add(p);
                e
            }
            None => ObjExtent::point(p),
        });
    }
    Ok(extent)
}

/// Measure one file. Unreadable or vertex-free files are logged and skipped.
pub(crate) fn measure(path: &Path, offset: Offset) -> Option<InputFootprint> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unable to read OBJ file");
            return None;
        }
    };
    match scan_extent(BufReader::new(file), offset) {
        Ok(Some(e)) => {
            debug!(
                path = %path.display(),
                min_x = e.min[0],
                max_x = e.max[0],
                min_y = e.min[1],
                max_y = e.max[1],
                "measured OBJ extents"
            );
            Some(InputFootprint::new(
                e.min[0],
                e.min[1],
                e.max[0],
                e.max[1],
                path.to_path_buf(),
            ))
        }
        Ok(None) => {
            warn!(path = %path.display(), "OBJ file has no vertices");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unable to read OBJ file");
            None
        }
    }
}

/// Every candidate source file: the explicit list, then the files under
/// `obj_dir` (recursively when asked) in file-name order.
pub(crate) fn collect_sources(sources: &Sources) -> Vec<PathBuf> {
    let mut out = sources.files.clone();
    if let Some(dir) = &sources.obj_dir {
        let walker = WalkDir::new(dir)
            .max_depth(if sources.recurse { usize::MAX } else { 1 })
            .sort_by_file_name();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => out.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable directory entry"),
            }
        }
    }
    out
}
