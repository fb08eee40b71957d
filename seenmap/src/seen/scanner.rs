//! Region log scanning.
//!
//! A region's exploration log is line-oriented text holding one block per
//! layer. A block opens with a marker line (`L <layer>`), the run-length
//! payload sits on the line immediately after it, two fixed-format header
//! rows follow, and then come the annotation records: an `N <x> <y>`
//! marker line per record with the raw annotation text on the next line.
//! The scanner walks a block in a single pass and hands the raw strings to
//! the decoders; it never interprets the payload itself.

use std::io::{self, BufRead};

/// One raw annotation record: the cell position from the marker line plus
/// the following text line, still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNote {
    pub x: u32,
    pub y: u32,
    pub text: String,
}

/// Raw material extracted from one layer block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLayer {
    /// The run-length payload line, undecoded.
    pub payload: String,

    /// Annotation records in file order.
    pub notes: Vec<RawNote>,
}

/// Scan a region log for the given layer's block.
///
/// Returns `Ok(None)` when no line marks the requested layer — the normal
/// case for a region saved without data at that depth, not an error. A
/// marker with nothing after it yields an empty payload; the cell-count
/// check downstream rejects it as truncated.
pub fn scan_layer<R: BufRead>(reader: R, layer: i32) -> io::Result<Option<RawLayer>> {
    let mut lines = reader.lines();

    loop {
        match lines.next() {
            None => return Ok(None),
            Some(line) => {
                if layer_marker(&line?) == Some(layer) {
                    break;
                }
            }
        }
    }

    let payload = match lines.next() {
        Some(line) => line?,
        None => return Ok(Some(RawLayer::default())),
    };

    // The payload line is the first of the three header rows; skip the
    // remaining two before the annotation records start.
    for _ in 0..2 {
        if let Some(line) = lines.next() {
            line?;
        }
    }

    let mut notes = Vec::new();
    while let Some(line) = lines.next() {
        let Some((x, y)) = note_marker(&line?) else {
            break;
        };
        match lines.next() {
            Some(text) => notes.push(RawNote { x, y, text: text? }),
            None => {
                tracing::warn!(x, y, "Annotation marker at end of file has no text line");
                break;
            }
        }
    }

    Ok(Some(RawLayer { payload, notes }))
}

/// Parse a layer marker line: the token `L` followed by exactly one
/// integer. An exact match, so `L 1` never matches a search for layer 10.
fn layer_marker(line: &str) -> Option<i32> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("L"), Some(n), None) => n.parse().ok(),
        _ => None,
    }
}

/// Parse an annotation marker line: the token `N` followed by two
/// non-negative integers.
fn note_marker(line: &str) -> Option<(u32, u32)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("N"), Some(x), Some(y), None) => Some((x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "\
# version 33
L 1
0 32400
0
0
L 10
0 100 1 50 0 32250
0
0
N 5 7
<:W;AUTO: goes up
N 12 3
GOOD STUFF HERE!
E 4
L 11
1 32400
0
0
";

    #[test]
    fn test_payload_is_the_line_after_the_marker() {
        let raw = scan_layer(Cursor::new(LOG), 10).unwrap().unwrap();
        assert_eq!(raw.payload, "0 100 1 50 0 32250");
    }

    #[test]
    fn test_notes_follow_the_header_rows() {
        let raw = scan_layer(Cursor::new(LOG), 10).unwrap().unwrap();
        assert_eq!(
            raw.notes,
            vec![
                RawNote {
                    x: 5,
                    y: 7,
                    text: "<:W;AUTO: goes up".to_string()
                },
                RawNote {
                    x: 12,
                    y: 3,
                    text: "GOOD STUFF HERE!".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_note_collection_stops_at_first_non_marker() {
        // Layer 1 has no notes: the line after its headers is `L 10`.
        let raw = scan_layer(Cursor::new(LOG), 1).unwrap().unwrap();
        assert_eq!(raw.payload, "0 32400");
        assert!(raw.notes.is_empty());
    }

    #[test]
    fn test_marker_match_is_exact() {
        // A search for layer 1 must not stop at `L 10` or `L 11`.
        let raw = scan_layer(Cursor::new(LOG), 1).unwrap().unwrap();
        assert_eq!(raw.payload, "0 32400");

        let raw = scan_layer(Cursor::new(LOG), 11).unwrap().unwrap();
        assert_eq!(raw.payload, "1 32400");
    }

    #[test]
    fn test_missing_layer_is_none() {
        assert_eq!(scan_layer(Cursor::new(LOG), 4).unwrap(), None);
        assert_eq!(scan_layer(Cursor::new(""), 10).unwrap(), None);
    }

    #[test]
    fn test_marker_at_end_of_file_yields_empty_payload() {
        let raw = scan_layer(Cursor::new("L 10"), 10).unwrap().unwrap();
        assert_eq!(raw, RawLayer::default());
    }

    #[test]
    fn test_note_text_may_look_like_a_marker() {
        // The line after an `N` marker is always text, even if it happens
        // to parse as a marker itself.
        let log = "L 10\n1 4\n0\n0\nN 1 1\nN 2 2\n";
        let raw = scan_layer(Cursor::new(log), 10).unwrap().unwrap();
        assert_eq!(
            raw.notes,
            vec![RawNote {
                x: 1,
                y: 1,
                text: "N 2 2".to_string()
            }]
        );
    }

    #[test]
    fn test_dangling_note_marker_is_dropped() {
        let log = "L 10\n1 4\n0\n0\nN 1 1";
        let raw = scan_layer(Cursor::new(log), 10).unwrap().unwrap();
        assert!(raw.notes.is_empty());
    }

    #[test]
    fn test_layer_marker_rejects_noise() {
        assert_eq!(layer_marker("L 10"), Some(10));
        assert_eq!(layer_marker("L -2"), Some(-2));
        assert_eq!(layer_marker("L"), None);
        assert_eq!(layer_marker("L 10 extra"), None);
        assert_eq!(layer_marker("LL 10"), None);
        assert_eq!(layer_marker("N 10"), None);
    }

    #[test]
    fn test_note_marker_rejects_noise() {
        assert_eq!(note_marker("N 3 4"), Some((3, 4)));
        assert_eq!(note_marker("N 3"), None);
        assert_eq!(note_marker("N -3 4"), None);
        assert_eq!(note_marker("N 3 4 5"), None);
        assert_eq!(note_marker("0 100 1 50"), None);
    }
}
