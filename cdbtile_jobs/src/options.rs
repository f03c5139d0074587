// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binder configuration.

use std::path::PathBuf;

use cdbtile_bsp::BspConfig;

bitflags::bitflags! {
    /// Input selection policies applied before indexing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BindOptions: u8 {
        /// Keep only the highest-LOD input of each source directory.
        const HIGHEST_LOD_ONLY = 0b0000_0001;
        /// Drop inputs whose extension is not `.obj`.
        const OBJ_ONLY         = 0b0000_0010;
    }
}

impl Default for BindOptions {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything a [`TileJobBinder`](crate::TileJobBinder) needs besides its
/// projector and inputs.
#[derive(Clone, Debug, Default)]
pub struct BinderSettings {
    /// Input selection policies.
    pub options: BindOptions,
    /// Subdivision limits of the footprint index.
    pub bsp: BspConfig,
    /// Directory that canonical tile paths are resolved against.
    pub output_root: PathBuf,
}

impl BinderSettings {
    /// Settings writing under `output_root` with default policies.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Replace the selection policies.
    #[must_use]
    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }
}
