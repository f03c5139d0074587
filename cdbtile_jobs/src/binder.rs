// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tile-job binder.

use std::path::{Path, PathBuf};

use cdbtile_bsp::{Bsp, Feature, FootprintId, RectVisitor, envelope_of};
use cdbtile_grid::{Coordinates, CoordinatesRange, Dataset, Lod, Tile, generate_tiles};
use kurbo::{Point, Rect};
use tracing::{debug, info, warn};

use crate::error::JobError;
use crate::job::RenderJob;
use crate::options::BinderSettings;
use crate::projection::{EllipsoidTangentPlane, LocalProjector};
use crate::source::{InputFootprint, select_inputs};

/// Indexes input footprints in a local frame and binds output tiles to them.
///
/// Each input becomes a rectangular [`Feature`] whose id is its position in
/// the source table, so query results map straight back to source paths.
pub struct TileJobBinder<P: LocalProjector = EllipsoidTangentPlane> {
    projector: P,
    settings: BinderSettings,
    bsp: Bsp<Feature>,
    sources: Vec<PathBuf>,
    local_extent: Option<Rect>,
}

impl<P: LocalProjector + core::fmt::Debug> core::fmt::Debug for TileJobBinder<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileJobBinder")
            .field("projector", &self.projector)
            .field("settings", &self.settings)
            .field("inputs", &self.sources.len())
            .field("local_extent", &self.local_extent)
            .finish_non_exhaustive()
    }
}

/// Segments each rectangle edge is cut into when sampling its outline.
const EDGE_SEGMENTS: u32 = 8;

/// Evenly spaced stops from `lo` to `hi`, plus `pivot` when strictly inside.
fn edge_stops(lo: f64, hi: f64, pivot: f64) -> impl Iterator<Item = f64> {
    let step = (hi - lo) / f64::from(EDGE_SEGMENTS);
    (0..=EDGE_SEGMENTS)
        .map(move |k| {
            if k == EDGE_SEGMENTS {
                hi
            } else {
                lo + step * f64::from(k)
            }
        })
        .chain((lo < pivot && pivot < hi).then_some(pivot))
}

/// Sample points on the boundary of `[x0, x1] x [y0, y1]`, corners included.
/// `pivot` adds the stops where the edges cross its axes.
fn outline(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    pivot: (f64, f64),
) -> impl Iterator<Item = (f64, f64)> {
    let horizontal = edge_stops(x0, x1, pivot.0).flat_map(move |x| [(x, y0), (x, y1)]);
    let vertical = edge_stops(y0, y1, pivot.1).flat_map(move |y| [(x0, y), (x1, y)]);
    horizontal.chain(vertical)
}

impl<P: LocalProjector> TileJobBinder<P> {
    /// Select, index and freeze `inputs`.
    ///
    /// Inputs with a non-finite bound are skipped with a warning; inverted
    /// bounds are normalized. Fails with [`JobError::NoInputs`] when nothing
    /// is left to index.
    pub fn bind(
        projector: P,
        settings: BinderSettings,
        inputs: Vec<InputFootprint>,
    ) -> Result<Self, JobError> {
        let total = inputs.len();
        let selected = select_inputs(inputs, settings.options);
        if selected.len() < total {
            debug!(
                kept = selected.len(),
                total, "input selection policies dropped some inputs"
            );
        }

        let mut bsp = Bsp::with_config(settings.bsp);
        let mut sources = Vec::with_capacity(selected.len());
        let mut local_extent: Option<Rect> = None;
        for input in selected {
            if !input.is_finite() {
                warn!(source = %input.source.display(), "skipping input with non-finite extents");
                continue;
            }
            let bounds = input.bounds.abs();
            let id = FootprintId::new(sources.len() as u64);
            bsp.add_geometry(Feature::rect(id, bounds));
            sources.push(input.source);
            local_extent = Some(local_extent.map_or(bounds, |acc| acc.union(bounds)));
        }

        let Some(extent) = local_extent else {
            return Err(JobError::NoInputs);
        };
        bsp.generate();

        info!(
            inputs = sources.len(),
            nodes = bsp.node_count(),
            depth = bsp.max_depth_reached(),
            "indexed input footprints"
        );
        info!(
            min_x = extent.x0,
            min_y = extent.y0,
            max_x = extent.x1,
            max_y = extent.y1,
            "database extents (local)"
        );

        let binder = Self {
            projector,
            settings,
            bsp,
            sources,
            local_extent,
        };
        if let Some(geo) = binder.geographic_extent() {
            info!(
                south = geo.south(),
                west = geo.west(),
                north = geo.north(),
                east = geo.east(),
                "database extents (geographic)"
            );
        }
        Ok(binder)
    }

    /// Union of every indexed footprint, in the local frame.
    pub fn local_extent(&self) -> Option<Rect> {
        self.local_extent
    }

    /// The local extent's outline taken back to geographic coordinates and
    /// bounded; `None` if the projector yields non-finite values.
    ///
    /// Straight local edges map to curves, so each edge is sampled rather than
    /// only its corners.
    pub fn geographic_extent(&self) -> Option<CoordinatesRange> {
        let e = self.local_extent?;
        CoordinatesRange::bounding(outline(e.x0, e.y0, e.x1, e.y1, (0.0, 0.0)).map(
            |(x, y)| {
                let (lat, lon, _) = self.projector.local_to_geodetic(x, y, 0.0);
                Coordinates::new(lat, lon)
            },
        ))
    }

    /// Bounding rectangle of `tile`'s outline in the local frame.
    ///
    /// Parallels bow towards the origin's latitude once projected, so the
    /// edges are sampled, including where they cross the origin's meridian.
    pub fn tile_local_extent(&self, tile: &Tile) -> Option<Rect> {
        let c = tile.coordinates();
        let (origin_lat, origin_lon, _) = self.projector.local_to_geodetic(0.0, 0.0, 0.0);
        let points: Vec<Point> = outline(
            c.west(),
            c.south(),
            c.east(),
            c.north(),
            (origin_lon, origin_lat),
        )
        .map(|(lon, lat)| {
            let (x, y, _) = self.projector.geodetic_to_local(lat, lon, 0.0);
            Point::new(x, y)
        })
        .collect();
        envelope_of(&points)
    }

    /// The job for `tile`, or `None` when no input touches it.
    pub fn bind_tile(&self, tile: &Tile) -> Option<RenderJob> {
        let extent = self.tile_local_extent(tile)?;
        let mut visitor = RectVisitor::new(extent);
        self.bsp.accept(&mut visitor);

        let inputs: Vec<PathBuf> = visitor
            .results()
            .iter()
            .filter_map(|f| self.source(f.id))
            .map(Path::to_path_buf)
            .collect();
        if inputs.is_empty() {
            return None;
        }

        debug!(
            tile = %tile,
            min_x = extent.x0,
            min_y = extent.y0,
            max_x = extent.x1,
            max_y = extent.y1,
            "tile extents (local)"
        );
        for input in &inputs {
            debug!(tile = %tile, source = %input.display(), "using source file");
        }

        let output_path = self.settings.output_root.join(tile.canonical_path());
        Some(RenderJob::new(*tile, extent, output_path, inputs))
    }

    /// One job per non-empty tile of `dataset` at `lod` over the database's
    /// geographic extent, in tile generation order.
    pub fn collect_render_jobs(&self, dataset: Dataset, lod: Lod) -> Vec<RenderJob> {
        let Some(region) = self.geographic_extent() else {
            warn!("database extents are not representable geographically");
            return Vec::new();
        };
        let tiles = generate_tiles(&region, dataset, lod);
        if tiles.is_empty() {
            warn!(
                south = region.south(),
                west = region.west(),
                north = region.north(),
                east = region.east(),
                %lod,
                "no tiles cover the database extents"
            );
        }
        let jobs: Vec<RenderJob> = tiles.iter().filter_map(|t| self.bind_tile(t)).collect();
        info!(
            %lod,
            %dataset,
            tiles = tiles.len(),
            jobs = jobs.len(),
            "collected render jobs"
        );
        jobs
    }

    /// Number of indexed inputs.
    pub fn input_count(&self) -> usize {
        self.sources.len()
    }

    /// The frozen footprint index.
    pub fn bsp(&self) -> &Bsp<Feature> {
        &self.bsp
    }

    /// The projector.
    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// The settings the binder was built with.
    pub fn settings(&self) -> &BinderSettings {
        &self.settings
    }

    /// Source path behind a footprint id.
    pub fn source(&self, id: FootprintId) -> Option<&Path> {
        let index = usize::try_from(id.get()).ok()?;
        self.sources.get(index).map(PathBuf::as_path)
    }
}
