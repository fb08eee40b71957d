//! Run-length decoding of the visibility bitmap.
//!
//! A layer's payload is a flat sequence of `(flag, length)` integer pairs
//! describing a row-major grid of width `mapx`. Decoding turns the visited
//! runs into scan-line boxes: single-row rectangles the renderer can fill
//! directly. A run crossing a row boundary is split into a head segment, a
//! full-width box per intermediate row, and a tail segment.

use thiserror::Error;

/// Errors produced while decoding a run-length payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A token was not a non-negative integer.
    #[error("malformed run token '{0}', expected an integer")]
    MalformedToken(String),

    /// The payload ended with a flag that has no length.
    #[error("dangling visibility flag without a run length")]
    DanglingFlag,

    /// A visibility flag was neither 0 nor 1.
    #[error("invalid visibility flag {0}, expected 0 or 1")]
    InvalidFlag(u64),

    /// A run had length zero.
    #[error("zero-length run at cell offset {0}")]
    ZeroLengthRun(u64),

    /// A run pushed the cell offset past the grid capacity.
    #[error("run of {len} cells at offset {offset} overflows the {cells}-cell grid")]
    Overflow { offset: u64, len: u64, cells: u64 },

    /// The run lengths did not cover the grid exactly.
    #[error("runs cover {actual} cells, expected exactly {expected}")]
    CellCountMismatch { expected: u64, actual: u64 },
}

/// A single-row rectangle of visited cells, region-local and unscaled.
/// Bounds are inclusive and `y0 == y1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl ScanBox {
    /// A box spanning `[x0, x1]` on one row.
    pub fn row(y: u32, x0: u32, x1: u32) -> Self {
        Self { x0, y0: y, x1, y1: y }
    }

    /// The single-cell box at `(x, y)`.
    pub fn cell(x: u32, y: u32) -> Self {
        Self::row(y, x, x)
    }

    /// Number of cells the box covers.
    pub fn cells(&self) -> u64 {
        (self.x1 - self.x0) as u64 + 1
    }
}

/// Result of decoding one payload: the visited boxes plus the total cell
/// count covered by all runs, visited or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRuns {
    pub boxes: Vec<ScanBox>,
    pub cells: u64,
}

/// Decode a run-length payload into scan-line boxes.
///
/// `mapx` is the grid width in cells; `max_cells` caps the running offset
/// so a corrupt length fails fast instead of allocating geometry past the
/// grid. Whether the runs cover the grid *exactly* is for the caller to
/// check against [`DecodedRuns::cells`], which keeps short payloads
/// decodable in isolation.
pub fn decode_boxes(payload: &str, mapx: u32, max_cells: u64) -> Result<DecodedRuns, DecodeError> {
    let mapx_wide = mapx as u64;
    let mut boxes = Vec::new();
    let mut position: u64 = 0;

    let mut tokens = payload.split_whitespace();
    while let Some(flag_token) = tokens.next() {
        let flag = parse_token(flag_token)?;
        let len_token = tokens.next().ok_or(DecodeError::DanglingFlag)?;
        let len = parse_token(len_token)?;

        if flag > 1 {
            return Err(DecodeError::InvalidFlag(flag));
        }
        if len == 0 {
            return Err(DecodeError::ZeroLengthRun(position));
        }
        let end = position
            .checked_add(len)
            .filter(|end| *end <= max_cells)
            .ok_or(DecodeError::Overflow {
                offset: position,
                len,
                cells: max_cells,
            })?;

        if flag == 1 {
            let x0 = (position % mapx_wide) as u32;
            let y0 = (position / mapx_wide) as u32;
            let last = end - 1;
            let x1 = (last % mapx_wide) as u32;
            let y1 = (last / mapx_wide) as u32;

            if y0 == y1 {
                boxes.push(ScanBox::row(y0, x0, x1));
            } else {
                // Split into scan lines: head to the row edge, full
                // intermediate rows, tail from column zero.
                boxes.push(ScanBox::row(y0, x0, mapx - 1));
                for sy in (y0 + 1)..y1 {
                    boxes.push(ScanBox::row(sy, 0, mapx - 1));
                }
                boxes.push(ScanBox::row(y1, 0, x1));
            }
        }

        position = end;
    }

    Ok(DecodedRuns {
        boxes,
        cells: position,
    })
}

fn parse_token(token: &str) -> Result<u64, DecodeError> {
    token
        .parse()
        .map_err(|_| DecodeError::MalformedToken(token.to_string()))
}
