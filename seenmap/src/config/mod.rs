//! Render configuration.
//!
//! One immutable [`RenderConfig`] carries every knob the decode and
//! composite passes need. It is built once (by the CLI or a test) and
//! passed by reference; nothing in the library mutates it or keeps
//! process-wide state.

/// Default region width in cells.
pub const DEFAULT_MAPX: u32 = 180;

/// Default region height in cells.
pub const DEFAULT_MAPY: u32 = 180;

/// Default layer index. Layer 10 is the game's ground level.
pub const DEFAULT_LAYER: i32 = 10;

/// Default pixel scale per cell.
pub const DEFAULT_SCALE: u32 = 2;

/// Configuration for one render run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Region width in cells.
    pub mapx: u32,

    /// Region height in cells.
    pub mapy: u32,

    /// Layer index to decode from each region log.
    pub layer: i32,

    /// Pixels per cell on the output canvas.
    pub scale: u32,

    /// Draw a one-pixel border around every region tile.
    pub draw_grid: bool,

    /// Draw an inset marker on the world-origin tile.
    pub draw_origin: bool,

    /// Draw a marker cell for every annotation.
    pub draw_notes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mapx: DEFAULT_MAPX,
            mapy: DEFAULT_MAPY,
            layer: DEFAULT_LAYER,
            scale: DEFAULT_SCALE,
            draw_grid: true,
            draw_origin: true,
            draw_notes: false,
        }
    }
}

impl RenderConfig {
    /// Create a config with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region size in cells.
    pub fn with_map_size(mut self, mapx: u32, mapy: u32) -> Self {
        self.mapx = mapx;
        self.mapy = mapy;
        self
    }

    /// Set the layer to decode.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Set the pixel scale per cell.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable the region grid overlay.
    pub fn with_grid(mut self, draw_grid: bool) -> Self {
        self.draw_grid = draw_grid;
        self
    }

    /// Enable or disable the origin marker.
    pub fn with_origin(mut self, draw_origin: bool) -> Self {
        self.draw_origin = draw_origin;
        self
    }

    /// Enable or disable note markers.
    pub fn with_notes(mut self, draw_notes: bool) -> Self {
        self.draw_notes = draw_notes;
        self
    }

    /// Total number of cells in one region's flattened grid.
    pub fn cell_count(&self) -> u64 {
        self.mapx as u64 * self.mapy as u64
    }

    /// Width of one region tile on the canvas, in pixels.
    pub fn tile_width(&self) -> u32 {
        self.mapx * self.scale
    }

    /// Height of one region tile on the canvas, in pixels.
    pub fn tile_height(&self) -> u32 {
        self.mapy * self.scale
    }
}
