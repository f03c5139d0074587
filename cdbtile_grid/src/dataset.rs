// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CDB dataset classifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

macro_rules! datasets {
    ($($(#[$doc:meta])* $variant:ident = $code:literal,)+) => {
        /// A CDB dataset: what kind of content a tile holds.
        ///
        /// Each dataset has a three-digit code and a name, both of which appear
        /// in tile paths (`004_Imagery`).
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Dataset {
            $($(#[$doc])* $variant,)+
        }

        impl Dataset {
            /// Every known dataset, in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Numeric dataset code.
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Dataset name as used in paths.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            /// Look a dataset up by numeric code.
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

datasets! {
    /// Primary terrain elevation.
    #[default]
    Elevation = 1,
    /// Per-tile elevation extrema.
    MinMaxElevation = 2,
    /// Maximum culture height.
    MaxCulture = 3,
    /// Visible-spectrum imagery.
    Imagery = 4,
    /// Raster material texture.
    RMTexture = 5,
    /// Raster material descriptor.
    RMDescriptor = 6,
    /// Geo-specific point, line and area features.
    GSFeature = 100,
    /// Geo-typical point, line and area features.
    GTFeature = 101,
    /// Political boundaries.
    GeoPolitical = 102,
    /// Road network.
    RoadNetwork = 201,
    /// Railroad network.
    RailRoadNetwork = 202,
    /// Power line network.
    PowerLineNetwork = 203,
    /// Hydrography network.
    HydrographyNetwork = 204,
    /// Geo-specific model geometry.
    GSModelGeometry = 300,
    /// Geo-specific model textures.
    GSModelTexture = 301,
    /// Geo-specific model signatures.
    GSModelSignature = 302,
    /// Geo-specific model descriptors.
    GSModelDescriptor = 303,
    /// Geo-specific model materials.
    GSModelMaterial = 304,
    /// Navigation data.
    Navigation = 401,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string named no known dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dataset `{0}`")]
pub struct ParseDatasetError(pub String);

impl FromStr for Dataset {
    type Err = ParseDatasetError;

    /// Accepts a dataset name (any case) or its numeric code (`4`, `004`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u16>() {
            return Self::from_code(code).ok_or_else(|| ParseDatasetError(s.to_owned()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDatasetError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_names() {
        assert_eq!(Dataset::Elevation.code(), 1);
        assert_eq!(Dataset::Imagery.code(), 4);
        assert_eq!(Dataset::Imagery.name(), "Imagery");
        assert_eq!(Dataset::GSModelGeometry.code(), 300);
        assert_eq!(Dataset::from_code(401), Some(Dataset::Navigation));
        assert_eq!(Dataset::from_code(7), None);
    }

    #[test]
    fn all_is_sorted_by_code() {
        assert!(Dataset::ALL.windows(2).all(|w| w[0].code() < w[1].code()));
        for d in Dataset::ALL {
            assert_eq!(Dataset::from_code(d.code()), Some(*d));
        }
    }

    #[test]
    fn parse_by_name_or_code() {
        assert_eq!("imagery".parse(), Ok(Dataset::Imagery));
        assert_eq!("004".parse(), Ok(Dataset::Imagery));
        assert_eq!(" 1 ".parse(), Ok(Dataset::Elevation));
        assert_eq!(
            "Bathymetry".parse::<Dataset>(),
            Err(ParseDatasetError("Bathymetry".into()))
        );
    }
}
