// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render jobs: one output tile and the inputs that feed it.

use std::fmt;
use std::path::{Path, PathBuf};

use cdbtile_grid::Tile;
use kurbo::Rect;

/// Work item for one non-empty output tile.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    tile: Tile,
    local_extent: Rect,
    output_path: PathBuf,
    inputs: Vec<PathBuf>,
}

impl RenderJob {
    /// Assemble a job.
    pub fn new(tile: Tile, local_extent: Rect, output_path: PathBuf, inputs: Vec<PathBuf>) -> Self {
        Self {
            tile,
            local_extent,
            output_path,
            inputs,
        }
    }

    /// The output tile.
    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Bounding rectangle of the tile's corners in the local frame.
    pub fn local_extent(&self) -> Rect {
        self.local_extent
    }

    /// Where the tile's file goes.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Contributing inputs, in query order.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }
}

/// A short tagged report used by dry runs.
impl fmt::Display for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.local_extent;
        writeln!(
            f,
            "<RenderJob enu-min-x=\"{}\" enu-max-x=\"{}\" enu-min-y=\"{}\" enu-max-y=\"{}\" >",
            e.x0, e.x1, e.y0, e.y1
        )?;
        writeln!(
            f,
            "\t<CDBTileName>{}</CDBTileName>",
            self.output_path.display()
        )?;
        for input in &self.inputs {
            writeln!(f, "\t<InputFile>{}</InputFile>", input.display())?;
        }
        write!(f, "</RenderJob>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdbtile_grid::{CoordinatesRange, Dataset, Lod};

    fn job() -> RenderJob {
        let tile = Tile::new(
            CoordinatesRange::from_bounds(0.0, 1.0, 0.0, 1.0),
            Dataset::Imagery,
            Lod::new(0),
            0,
            0,
        );
        RenderJob::new(
            tile,
            Rect::new(-1.5, -2.0, 3.0, 4.25),
            PathBuf::from("out/x.jp2"),
            vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")],
        )
    }

    #[test]
    fn report_form() {
        let text = job().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "<RenderJob enu-min-x=\"-1.5\" enu-max-x=\"3\" enu-min-y=\"-2\" enu-max-y=\"4.25\" >",
                "\t<CDBTileName>out/x.jp2</CDBTileName>",
                "\t<InputFile>a.obj</InputFile>",
                "\t<InputFile>b.obj</InputFile>",
                "</RenderJob>",
            ]
        );
    }

    #[test]
    fn jobs_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderJob>();

        let j = job();
        let handle = std::thread::spawn(move || j.inputs().len());
        assert_eq!(handle.join().ok(), Some(2));
    }
}
