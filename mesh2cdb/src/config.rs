// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The JSON configuration file.
//!
//! ```json
//! {
//!   "origin": { "lat": 45.5, "lon": 7.5 },
//!   "offset": { "x": 0.0, "y": 0.0, "z": 0.0 },
//!   "max_lod": 3,
//!   "dataset": "Imagery",
//!   "highest_lod_only": true,
//!   "output_dir": "cdb",
//!   "sources": { "obj_dir": "meshes", "recurse": true, "files": [] },
//!   "bsp": { "max_depth": 10, "target_count": 10 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use cdbtile_bsp::BspConfig;
use cdbtile_grid::{Dataset, ParseDatasetError};
use serde::Deserialize;
use thiserror::Error;

/// Configuration failures.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {field} - {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Dataset(#[from] ParseDatasetError),
}

/// Geodetic origin of the local frame, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct Origin {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

/// Translation added to every OBJ vertex before measuring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Offset {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
}

/// Where the meshes come from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Sources {
    pub(crate) obj_dir: Option<PathBuf>,
    pub(crate) recurse: bool,
    pub(crate) files: Vec<PathBuf>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            obj_dir: None,
            recurse: true,
            files: Vec::new(),
        }
    }
}

/// Index subdivision limits.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct BspLimits {
    pub(crate) max_depth: usize,
    pub(crate) target_count: usize,
}

impl Default for BspLimits {
    fn default() -> Self {
        let d = BspConfig::default();
        Self {
            max_depth: d.max_depth,
            target_count: d.target_count,
        }
    }
}

impl From<BspLimits> for BspConfig {
    fn from(limits: BspLimits) -> Self {
        Self {
            max_depth: limits.max_depth,
            target_count: limits.target_count,
            ..Self::default()
        }
    }
}

fn default_max_lod() -> i32 {
    1
}

fn default_dataset() -> String {
    Dataset::Imagery.name().to_owned()
}

/// Planner configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct Config {
    pub(crate) origin: Origin,
    #[serde(default)]
    pub(crate) offset: Offset,
    #[serde(default = "default_max_lod")]
    pub(crate) max_lod: i32,
    #[serde(default = "default_dataset")]
    pub(crate) dataset: String,
    #[serde(default)]
    pub(crate) highest_lod_only: bool,
    pub(crate) output_dir: PathBuf,
    #[serde(default)]
    pub(crate) sources: Sources,
    #[serde(default)]
    pub(crate) bsp: BspLimits,
}

impl Config {
    /// Read and parse `path`. Does not validate.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured dataset.
    pub(crate) fn dataset(&self) -> Result<Dataset, ConfigError> {
        Ok(self.dataset.parse()?)
    }

    /// Reject values the planner cannot work with.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_owned(),
            })
        };
        if !(-90.0..=90.0).contains(&self.origin.lat) {
            return invalid("origin.lat", "must be within [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&self.origin.lon) {
            return invalid("origin.lon", "must be within [-180, 180]");
        }
        if ![self.offset.x, self.offset.y, self.offset.z]
            .iter()
            .all(|v| v.is_finite())
        {
            return invalid("offset", "must be finite");
        }
        if self.output_dir.as_os_str().is_empty() {
            return invalid("output_dir", "must not be empty");
        }
        if self.sources.obj_dir.is_none() && self.sources.files.is_empty() {
            return invalid("sources", "name an obj_dir or at least one file");
        }
        if self.bsp.target_count == 0 {
            return invalid("bsp.target_count", "must be at least 1");
        }
        self.dataset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Config {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let c = parse(r#"{ "origin": { "lat": 1.0, "lon": 2.0 }, "output_dir": "cdb",
                          "sources": { "obj_dir": "m" } }"#);
        assert_eq!(c.max_lod, 1);
        assert_eq!(c.dataset().unwrap(), Dataset::Imagery);
        assert!(!c.highest_lod_only);
        assert!(c.sources.recurse);
        assert_eq!(c.offset, Offset::default());
        assert_eq!(BspConfig::from(c.bsp), BspConfig::default());
        c.validate().unwrap();
    }

    #[test]
    fn full_config() {
        let c = parse(
            r#"{
                "origin": { "lat": -33.9, "lon": 151.2 },
                "offset": { "x": 10.0, "y": -5.0 },
                "max_lod": -2,
                "dataset": "Elevation",
                "highest_lod_only": true,
                "output_dir": "/data/cdb",
                "sources": { "recurse": false, "files": ["a.obj", "b.obj"] },
                "bsp": { "max_depth": 6, "target_count": 4 }
            }"#,
        );
        assert_eq!(c.offset.z, 0.0);
        assert_eq!(c.max_lod, -2);
        assert_eq!(c.dataset().unwrap(), Dataset::Elevation);
        assert_eq!(c.sources.files.len(), 2);
        let bsp = BspConfig::from(c.bsp);
        assert_eq!((bsp.max_depth, bsp.target_count), (6, 4));
        c.validate().unwrap();
    }

    #[test]
    fn validation_failures() {
        let base = r#"{ "origin": { "lat": 1.0, "lon": 2.0 }, "output_dir": "cdb",
                        "sources": { "obj_dir": "m" } }"#;
        let mut c = parse(base);
        c.origin.lat = 91.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "origin.lat", .. })
        ));

        let mut c = parse(base);
        c.sources.obj_dir = None;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "sources", .. })
        ));

        let mut c = parse(base);
        c.dataset = "Nope".into();
        assert!(matches!(c.validate(), Err(ConfigError::Dataset(_))));

        let mut c = parse(base);
        c.origin.lon = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/mesh2cdb.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/mesh2cdb.json"));
    }
}
