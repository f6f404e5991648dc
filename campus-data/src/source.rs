//! Capability-based file access for map exports.

use std::io::{self, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::info;
use thiserror::Error;

use crate::osm_xml::{OsmLoadReport, OsmXmlError, read_osm_xml};

/// Errors returned by [`load_osm_xml`].
#[derive(Debug, Error)]
pub enum OsmLoadError {
    /// The file could not be opened.
    #[error("failed to open OSM XML file at {path}")]
    Open {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file was opened but is not a valid export.
    #[error("failed to read OSM XML file at {path}")]
    Parse {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Reader failure.
        #[source]
        source: OsmXmlError,
    },
}

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Propagates the I/O error raised when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns an error when the parent directory cannot be opened or the entry's
/// metadata cannot be read. A missing entry surfaces as
/// [`io::ErrorKind::NotFound`] so callers can report it distinctly.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Ok(false);
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

/// Load an OSM XML export from disk.
///
/// # Errors
/// Returns [`OsmLoadError::Open`] when the file cannot be opened and
/// [`OsmLoadError::Parse`] when its contents are not a valid export.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use campus_data::load_osm_xml;
///
/// # fn main() -> Result<(), campus_data::OsmLoadError> {
/// let report = load_osm_xml(Utf8Path::new("nu.osm"))?;
/// assert!(report.summary.nodes > 0);
/// # Ok(())
/// # }
/// ```
pub fn load_osm_xml(path: &Utf8Path) -> Result<OsmLoadReport, OsmLoadError> {
    let file = open_utf8_file(path).map_err(|source| OsmLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let report = read_osm_xml(BufReader::new(file)).map_err(|source| OsmLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Loaded {} elements from {path} ({} nodes, {} ways, {} relations)",
        report.elements.len(),
        report.summary.nodes,
        report.summary.ways,
        report.summary.relations
    );
    Ok(report)
}
