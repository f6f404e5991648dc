//! Facade crate for the campus map explorer.
//!
//! This crate re-exports the core domain types and, behind the default
//! `osm-xml` feature, the loader for OpenStreetMap XML exports.

#![forbid(unsafe_code)]

pub use campus_core::{
    Anchor, COORDINATE_DECIMALS, CampusMap, CategoryFilter, CentroidError, DISTANCE_DECIMALS,
    ElementKind, Entity, EntityCollection, EntityError, EntityKind, MapSummary, NearestOutcome,
    NearestReport, Position, PositionStore, RawElement, SearchOutcome, Tags, distance_miles,
    nearest_amenities,
};

#[cfg(feature = "osm-xml")]
pub use campus_data::{
    OsmLoadError, OsmLoadReport, OsmLoadSummary, OsmXmlError, load_osm_xml, read_osm_xml,
};
