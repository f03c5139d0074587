// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failures while binding inputs to tiles.
#[derive(Debug, Error)]
pub enum JobError {
    /// Every input was filtered out or had unusable extents.
    #[error("no usable input footprints were indexed")]
    NoInputs,
}
