// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CDB levels of detail.

use std::fmt;

/// A CDB level of detail, clamped to `[-10, 23]`.
///
/// Positive levels subdivide a geocell into `2^lod` rows and columns of
/// 1024×1024-post tiles. Negative ("coarse") levels keep one tile per geocell
/// and shrink the post grid instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lod(i8);

impl Lod {
    /// Coarsest level.
    pub const MIN: Self = Self(-10);
    /// Finest level.
    pub const MAX: Self = Self(23);

    /// Create a level, clamping `value` into range.
    pub fn new(value: i32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped into [-10, 23] first"
        )]
        let v = value.clamp(i32::from(Self::MIN.0), i32::from(Self::MAX.0)) as i8;
        Self(v)
    }

    /// The level as a signed integer.
    pub const fn value(self) -> i8 {
        self.0
    }

    /// Posts per tile edge: `2^min(lod + 10, 10)`.
    pub fn dimensions(self) -> u32 {
        let exp = (i32::from(self.0) + 10).min(10);
        1_u32 << exp.unsigned_abs()
    }

    /// Tile rows per geocell: `max(2^lod, 1)`.
    pub fn rows(self) -> u32 {
        if self.0 <= 0 {
            1
        } else {
            1_u32 << self.0.unsigned_abs()
        }
    }

    /// Tile columns per geocell; always equal to [`rows`](Self::rows).
    pub fn cols(self) -> u32 {
        self.rows()
    }

    /// True for the negative, coarse levels.
    pub const fn is_coarse(self) -> bool {
        self.0 < 0
    }

    /// Directory token: `LC` for coarse levels, otherwise `L` and two digits.
    pub fn subdir(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Lod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_coarse() {
            f.write_str("LC")
        } else {
            write!(f, "L{:02}", self.0)
        }
    }
}

impl From<i8> for Lod {
    fn from(value: i8) -> Self {
        Self::new(i32::from(value))
    }
}
