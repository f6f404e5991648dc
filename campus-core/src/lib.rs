//! Core domain types for the campus map explorer.
//!
//! The crate turns parsed map elements into a position index plus sorted
//! building and amenity collections, and answers name, category and
//! nearest-amenity queries over them. Parsing the export format lives in
//! `campus-data`; presentation lives in `campus-cli`.
//!
//! Invariants:
//! - Everything is built once and then read-only.
//! - No global mutable state; diagnostics go through the `log` facade.

#![forbid(unsafe_code)]

mod collection;
mod distance;
mod element;
mod entity;
mod map;
mod nearest;
mod position;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use collection::{CategoryFilter, EntityCollection, SearchOutcome};
pub use distance::{
    DISTANCE_DECIMALS, EARTH_RADIUS_KM, MILES_PER_KM, distance_between, distance_miles,
};
pub use element::{ElementKind, RawElement, Tags};
pub use entity::{
    COORDINATE_DECIMALS, CentroidError, Detail, Entity, EntityError, EntityKind, NODE_NOT_FOUND,
    Summary,
};
pub use map::{CampusMap, MapSummary};
pub use nearest::{Anchor, NearestOutcome, NearestReport, nearest_amenities};
pub use position::{ENTRANCE_VALUES, Position, PositionStore};
