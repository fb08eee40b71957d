//! The composite pass: decoded regions onto the shared canvas.
//!
//! The world grid is walked in a fixed order (south to north, west to
//! east) and every present region is fully scanned, decoded, and drawn
//! before the next one. Each region owns a disjoint tile of the canvas,
//! offset by `(ix * mapx * scale, iy * mapy * scale)` pixels, so tile
//! writes never overlap. Overlays go on after the regions, in significant
//! order: the grid paints over note markers where they touch the tile
//! edge, and the origin marker paints over the grid.

use thiserror::Error;

use crate::config::RenderConfig;
use crate::coord::RegionCoord;
use crate::seen::{self, RegionError, ScanBox};
use crate::world::RegionIndex;

use super::{Palette, Surface};

/// Counters summarizing one composite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Regions decoded (including those empty for the layer).
    pub regions: usize,

    /// Scan-line boxes filled.
    pub boxes: u64,

    /// Notes decoded (drawn only when note markers are enabled).
    pub notes: u64,
}

/// Errors from the composite pass, attributed to the offending region.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A region's log failed to decode. Strict by design: a silently
    /// partial map is worse than a clear failure.
    #[error("region {region}: {source}")]
    Region {
        region: RegionCoord,
        #[source]
        source: RegionError,
    },
}

/// Composites decoded region data onto a raster surface.
pub struct Compositor<'a> {
    config: &'a RenderConfig,
    palette: Palette,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
        }
    }

    /// Replace the default palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Canvas size in pixels required for the index's extent.
    pub fn canvas_size(&self, index: &RegionIndex) -> (u32, u32) {
        let extent = index.extent();
        (
            extent.width() * self.config.tile_width(),
            extent.height() * self.config.tile_height(),
        )
    }

    /// Run the full composite pass over `surface`.
    ///
    /// The surface must be at least [`Self::canvas_size`] pixels and
    /// already cleared to the background color.
    pub fn render<S: Surface>(
        &self,
        index: &RegionIndex,
        surface: &mut S,
    ) -> Result<RenderStats, ComposeError> {
        let mut stats = RenderStats::default();
        let extent = index.extent();

        for slot in extent.tiles() {
            let Some(path) = index.get(slot.coord) else {
                continue;
            };
            tracing::debug!(region = %slot.coord, "Compositing region");

            let data = seen::decode_region(path, self.config).map_err(|source| {
                ComposeError::Region {
                    region: slot.coord,
                    source,
                }
            })?;

            for b in &data.boxes {
                let (x0, y0, x1, y1) = self.box_to_pixels(b, slot.ix, slot.iy);
                surface.fill_rect(x0, y0, x1, y1, self.palette.visited);
            }
            stats.boxes += data.boxes.len() as u64;
            stats.notes += data.notes.len() as u64;
            stats.regions += 1;

            if self.config.draw_notes {
                for note in &data.notes {
                    if note.x >= self.config.mapx || note.y >= self.config.mapy {
                        tracing::warn!(
                            region = %slot.coord,
                            x = note.x,
                            y = note.y,
                            "Note position outside the region grid, skipping"
                        );
                        continue;
                    }
                    let cell = ScanBox::cell(note.x, note.y);
                    let (x0, y0, x1, y1) = self.box_to_pixels(&cell, slot.ix, slot.iy);
                    surface.fill_rect(x0, y0, x1, y1, self.palette.note);
                }
            }
        }

        if self.config.draw_grid {
            for slot in extent.tiles() {
                let (x0, y0) = self.tile_origin(slot.ix, slot.iy);
                surface.outline_rect(
                    x0,
                    y0,
                    x0 + self.config.tile_width(),
                    y0 + self.config.tile_height(),
                    self.palette.grid,
                );
            }
        }

        if self.config.draw_origin {
            let (ix, iy) = extent.origin_slot();
            let (x0, y0) = self.tile_origin(ix, iy);
            surface.outline_rect(
                x0 + 1,
                y0 + 1,
                x0 + self.config.tile_width() - 1,
                y0 + self.config.tile_height() - 1,
                self.palette.origin,
            );
        }

        Ok(stats)
    }

    /// Top-left canvas pixel of the tile at `(ix, iy)`.
    fn tile_origin(&self, ix: u32, iy: u32) -> (u32, u32) {
        (
            ix * self.config.tile_width(),
            iy * self.config.tile_height(),
        )
    }

    /// Transform a region-local box into canvas pixels for the tile at
    /// `(ix, iy)`. Far edges are exclusive: the `+1` converts the box's
    /// inclusive cell bound to an exclusive one, so each cell spans
    /// exactly `scale` pixels.
    pub fn box_to_pixels(&self, b: &ScanBox, ix: u32, iy: u32) -> (u32, u32, u32, u32) {
        let s = self.config.scale;
        let (ox, oy) = self.tile_origin(ix, iy);
        (
            ox + b.x0 * s,
            oy + b.y0 * s,
            ox + (b.x1 + 1) * s,
            oy + (b.y1 + 1) * s,
        )
    }
}
