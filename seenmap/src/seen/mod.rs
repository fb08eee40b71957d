//! Exploration-log decoding.
//!
//! Turns one region's log file into renderable geometry: scan-line boxes
//! for the visited cells and positioned notes for the annotations. The
//! submodules split the work the way the data splits: [`scanner`] locates
//! the layer block and extracts raw strings, [`rle`] decodes the
//! visibility payload, [`note`] parses annotation text.

mod note;
mod rle;
mod scanner;

pub use note::{parse_note, Note, NoteColor, ParsedNote};
pub use rle::{decode_boxes, DecodeError, DecodedRuns, ScanBox};
pub use scanner::{scan_layer, RawLayer, RawNote};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use crate::config::RenderConfig;

/// Errors from decoding one region's log.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The log file could not be read.
    #[error("failed to read region log: {0}")]
    Io(#[from] std::io::Error),

    /// The layer block was malformed or truncated.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Everything decoded from one region for one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionData {
    /// Visited-cell boxes, region-local and unscaled.
    pub boxes: Vec<ScanBox>,

    /// Annotations, region-local and unscaled.
    pub notes: Vec<Note>,
}

/// Decode the configured layer of one region log.
///
/// A log without the requested layer yields an empty [`RegionData`]. A log
/// whose runs do not cover the region grid exactly is rejected: partial
/// visibility data means a truncated or corrupt save, and truncating or
/// padding it silently would misrender the map. The file handle lives only
/// for the scan and is released on every path out of this function.
pub fn decode_region(path: &Path, config: &RenderConfig) -> Result<RegionData, RegionError> {
    let file = File::open(path)?;
    let raw = scan_layer(BufReader::new(file), config.layer)?;

    let Some(raw) = raw else {
        tracing::debug!(path = %path.display(), layer = config.layer, "No data for layer");
        return Ok(RegionData::default());
    };

    let expected = config.cell_count();
    let decoded = decode_boxes(&raw.payload, config.mapx, expected)?;
    if decoded.cells != expected {
        return Err(DecodeError::CellCountMismatch {
            expected,
            actual: decoded.cells,
        }
        .into());
    }

    let notes = raw
        .notes
        .into_iter()
        .map(|r| parse_note(&r.text).at(r.x, r.y))
        .collect();

    Ok(RegionData {
        boxes: decoded.boxes,
        notes,
    })
}
