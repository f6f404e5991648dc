//! Map export loading for the campus explorer.
//!
//! Responsibilities:
//! - Read OSM XML exports into the raw elements consumed by `campus-core`.
//! - Summarise element counts and the bounding box of the export.
//! - Open map files through capability-based filesystem access.
//!
//! Boundaries:
//! - Do not encode domain rules (these live in `campus-core`).
//!
//! Invariants:
//! - Elements are returned in document order.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod osm_xml;
mod source;

pub use osm_xml::{OsmLoadReport, OsmLoadSummary, OsmXmlError, read_osm_xml};
pub use source::{OsmLoadError, file_is_file, load_osm_xml, open_utf8_file};
