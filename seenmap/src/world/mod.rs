//! Region discovery over a save directory.
//!
//! A save stores one exploration log per region, named
//! `#<save-id>.seen.<x>.<y>` with signed world coordinates in the suffix.
//! Discovery walks the directory once, indexes every match by coordinate,
//! and computes the extent the canvas must span. The index is read-only
//! after this pass.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coord::{RegionCoord, WorldExtent};

/// Errors raised while discovering region logs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No filename in the directory matched the region log convention.
    #[error("no region log files found under {0}")]
    NoRegions(PathBuf),

    /// The save directory could not be read.
    #[error("failed to read save directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Index of discovered region logs and the world extent they span.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    regions: HashMap<RegionCoord, PathBuf>,
    extent: WorldExtent,
}

impl RegionIndex {
    /// Discover every region log in `save_dir` by naming convention.
    ///
    /// Fails with [`DiscoveryError::NoRegions`] when nothing matches; the
    /// caller must not allocate a canvas in that case.
    pub fn discover(save_dir: &Path) -> Result<Self, DiscoveryError> {
        let io_err = |source| DiscoveryError::Io {
            path: save_dir.to_path_buf(),
            source,
        };

        let mut regions = HashMap::new();
        let mut extent = WorldExtent::origin();

        for entry in fs::read_dir(save_dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(coord) = parse_log_filename(name) else {
                continue;
            };
            tracing::debug!(file = %name, region = %coord, "Found region log");
            extent.expand(coord);
            regions.insert(coord, entry.path());
        }

        if regions.is_empty() {
            return Err(DiscoveryError::NoRegions(save_dir.to_path_buf()));
        }
        Ok(Self { regions, extent })
    }

    /// Extent of the populated world grid, origin included.
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Path of the log for `coord`, if that region was saved.
    pub fn get(&self, coord: RegionCoord) -> Option<&Path> {
        self.regions.get(&coord).map(PathBuf::as_path)
    }

    /// Number of discovered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Parse a region log basename of the form `#<save-id>.seen.<x>.<y>`.
///
/// The coordinate tokenizer is sign-aware; anything that is not exactly
/// two dot-separated integers after the `.seen.` marker is rejected.
pub fn parse_log_filename(name: &str) -> Option<RegionCoord> {
    if !name.starts_with('#') {
        return None;
    }
    let (_, suffix) = name.split_once(".seen.")?;
    let (x, y) = suffix.split_once('.')?;
    Some(RegionCoord::new(parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"L 10\n").unwrap();
    }

    #[test]
    fn test_parse_log_filename() {
        assert_eq!(
            parse_log_filename("#QXJhbmE=.seen.0.0"),
            Some(RegionCoord::new(0, 0))
        );
        assert_eq!(
            parse_log_filename("#QXJhbmE=.seen.-3.12"),
            Some(RegionCoord::new(-3, 12))
        );
        assert_eq!(
            parse_log_filename("#X.seen.7.-4"),
            Some(RegionCoord::new(7, -4))
        );
    }

    #[test]
    fn test_parse_log_filename_rejects_non_matches() {
        // No leading #.
        assert_eq!(parse_log_filename("save.seen.0.0"), None);
        // Wrong file kind.
        assert_eq!(parse_log_filename("#QXJhbmE=.sav"), None);
        assert_eq!(parse_log_filename("#QXJhbmE=.mm1.0.0"), None);
        // Malformed coordinate suffixes.
        assert_eq!(parse_log_filename("#X.seen.0"), None);
        assert_eq!(parse_log_filename("#X.seen.0.1.2"), None);
        assert_eq!(parse_log_filename("#X.seen.a.b"), None);
        assert_eq!(parse_log_filename("#X.seen.1-2.0"), None);
        assert_eq!(parse_log_filename("#X.seen.-.0"), None);
    }

    #[test]
    fn test_discover_indexes_matching_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "#World=.seen.0.0");
        touch(&dir, "#World=.seen.1.0");
        touch(&dir, "#World=.seen.-1.-2");
        touch(&dir, "#World=.sav");
        touch(&dir, "notes.txt");

        let index = RegionIndex::discover(dir.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.get(RegionCoord::new(1, 0)).is_some());
        assert!(index.get(RegionCoord::new(2, 0)).is_none());

        let extent = index.extent();
        assert_eq!((extent.west, extent.east), (-1, 1));
        assert_eq!((extent.south, extent.north), (-2, 0));
    }

    #[test]
    fn test_discover_extent_includes_origin() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "#World=.seen.4.5");

        let index = RegionIndex::discover(dir.path()).unwrap();
        let extent = index.extent();
        assert_eq!((extent.west, extent.south), (0, 0));
        assert_eq!(extent.width(), 5);
        assert_eq!(extent.height(), 6);
    }

    #[test]
    fn test_discover_empty_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = RegionIndex::discover(dir.path()).unwrap_err();
        assert!(matches!(err, DiscoveryError::NoRegions(_)));
    }

    #[test]
    fn test_discover_missing_dir_is_an_io_error() {
        let err = RegionIndex::discover(Path::new("/nonexistent/save")).unwrap_err();
        assert!(matches!(err, DiscoveryError::Io { .. }));
    }
}
