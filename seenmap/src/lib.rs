//! Seenmap - tiled rendering of explored overmap data
//!
//! This library decodes a save's per-region exploration logs (a
//! run-length-encoded visibility bitmap plus free-text annotation records)
//! and composites the decoded geometry into one raster image covering the
//! populated world grid, one fixed-size tile per region.
//!
//! The pipeline, leaf-first: [`world`] discovers region logs by filename,
//! [`seen`] scans and decodes a single region's layer block, and [`render`]
//! places the decoded boxes and notes on a shared canvas.

pub mod config;
pub mod coord;
pub mod render;
pub mod seen;
pub mod world;

pub use config::RenderConfig;
pub use coord::{RegionCoord, WorldExtent};
pub use render::{ComposeError, Compositor, ImageSurface, Palette, RenderStats, Surface};
pub use seen::{DecodeError, Note, NoteColor, RegionData, RegionError, ScanBox};
pub use world::{DiscoveryError, RegionIndex};

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
