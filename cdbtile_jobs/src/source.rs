// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input footprints and the policies that select among them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kurbo::Rect;

use crate::options::BindOptions;

/// The local-frame extent of one input file.
#[derive(Clone, Debug, PartialEq)]
pub struct InputFootprint {
    /// Axis-aligned bounds in the binder's local frame.
    pub bounds: Rect,
    /// Path of the file the bounds were measured from.
    pub source: PathBuf,
}

impl InputFootprint {
    /// An input spanning `(min_x, min_y)` to `(max_x, max_y)`.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, source: impl Into<PathBuf>) -> Self {
        Self {
            bounds: Rect::new(min_x, min_y, max_x, max_y),
            source: source.into(),
        }
    }

    /// True when every bound is a finite number.
    pub fn is_finite(&self) -> bool {
        self.bounds.is_finite()
    }

    /// LOD encoded in the source file name, see [`lod_from_filename`].
    pub fn lod(&self) -> i32 {
        lod_from_filename(&self.source)
    }
}

/// Anything that names the file it came from.
pub trait InputSource {
    /// Path of the input file.
    fn source_path(&self) -> &Path;
}

impl InputSource for InputFootprint {
    fn source_path(&self) -> &Path {
        &self.source
    }
}

impl InputSource for PathBuf {
    fn source_path(&self) -> &Path {
        self
    }
}

/// Level of detail encoded in a file name such as `tile_L12.obj`.
///
/// Reads the optionally signed decimal integer that follows the last `L` of
/// the file stem, ignoring anything after its digits. Names with no `L`, or
/// no digits after it, are LOD 0.
pub fn lod_from_filename(path: &Path) -> i32 {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return 0;
    };
    let Some(pos) = stem.rfind('L') else {
        return 0;
    };
    let rest = &stem[pos + 1..];
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let mut value: i32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }
    if negative { -value } else { value }
}

fn is_obj(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("obj"))
}

/// Apply the selection policies of `options` to `inputs`.
///
/// Works on bare paths as well as measured footprints, so callers can select
/// before paying for an extent scan. Selection is idempotent.
///
/// With [`BindOptions::OBJ_ONLY`] only `.obj` files survive. With
/// [`BindOptions::HIGHEST_LOD_ONLY`] each parent directory keeps its single
/// highest-LOD input (the first seen on ties) and the result is ordered by
/// directory. Otherwise input order is preserved.
pub fn select_inputs<T: InputSource>(inputs: Vec<T>, options: BindOptions) -> Vec<T> {
    let inputs = if options.contains(BindOptions::OBJ_ONLY) {
        inputs
            .into_iter()
            .filter(|i| is_obj(i.source_path()))
            .collect()
    } else {
        inputs
    };

    if !options.contains(BindOptions::HIGHEST_LOD_ONLY) {
        return inputs;
    }

    let mut best: BTreeMap<PathBuf, (i32, T)> = BTreeMap::new();
    for input in inputs {
        let path = input.source_path();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let lod = lod_from_filename(path);
        match best.get_mut(&dir) {
            Some((best_lod, kept)) => {
                if lod > *best_lod {
                    *best_lod = lod;
                    *kept = input;
                }
            }
            None => {
                best.insert(dir, (lod, input));
            }
        }
    }
    best.into_values().map(|(_, input)| input).collect()
}
