//! Index of map positions keyed by their source identifier.
//!
//! Positions are kept in a vector sorted by identifier and probed with a
//! binary search, so lookups stay logarithmic even for maps with hundreds of
//! thousands of nodes. The store is built once and never mutated.

use geo::Coord;
use log::{debug, warn};

use crate::element::{ElementKind, RawElement};

/// Values of the `entrance` tag that mark a node as an entry point.
pub const ENTRANCE_VALUES: [&str; 3] = ["yes", "main", "entrance"];

/// A single point on the map.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use campus_core::Position;
///
/// let position = Position::new(10, 42.0565, -87.6753, true);
/// assert_eq!(position.lat(), 42.0565);
/// assert_eq!(position.lon(), -87.6753);
/// assert!(position.is_entrance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Identifier assigned by the source map.
    pub id: i64,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Whether the node marks an entrance.
    pub is_entrance: bool,
}

impl Position {
    /// Construct a position from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(id: i64, lat: f64, lon: f64, is_entrance: bool) -> Self {
        Self {
            id,
            location: Coord { x: lon, y: lat },
            is_entrance,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.x
    }
}

/// Read-only index of every position in a map.
///
/// # Examples
/// ```
/// use campus_core::{Position, PositionStore};
///
/// let store = PositionStore::from_positions([
///     Position::new(30, 1.0, 1.0, false),
///     Position::new(10, 0.0, 0.0, true),
/// ]);
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.lookup(10).map(|p| p.is_entrance), Some(true));
/// assert!(store.lookup(20).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionStore {
    positions: Vec<Position>,
}

impl PositionStore {
    /// Build the store from every node element in `elements`.
    ///
    /// Ways and other elements are ignored. A node is an entrance when its
    /// `entrance` tag is `yes`, `main` or `entrance`.
    pub fn build<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a RawElement>,
    {
        Self::from_positions(elements.into_iter().filter_map(position_from_element))
    }

    /// Build the store from already extracted positions.
    ///
    /// When an identifier occurs more than once the last occurrence wins.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut collected: Vec<Position> = positions.into_iter().collect();
        let total = collected.len();
        // Reverse first so the stable sort leaves the last occurrence of each
        // identifier in front, where `dedup_by_key` keeps it.
        collected.reverse();
        collected.sort_by_key(|position| position.id);
        collected.dedup_by_key(|position| position.id);

        let overwritten = total - collected.len();
        if overwritten > 0 {
            warn!("Overwrote {overwritten} positions with duplicate identifiers");
        }
        debug!("Indexed {} positions", collected.len());
        Self {
            positions: collected,
        }
    }

    /// Return the position stored under `id`, if any.
    #[must_use]
    pub fn lookup(&self, id: i64) -> Option<&Position> {
        self.positions
            .binary_search_by_key(&id, |position| position.id)
            .ok()
            .and_then(|index| self.positions.get(index))
    }

    /// Number of indexed positions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.positions.len()
    }

    /// Return true when the store holds no positions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over positions in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.positions.iter()
    }
}

fn position_from_element(element: &RawElement) -> Option<Position> {
    match element.kind {
        ElementKind::Node { lat, lon } => Some(Position::new(
            element.id,
            lat,
            lon,
            is_entrance(element),
        )),
        ElementKind::Way { .. } | ElementKind::Other { .. } => None,
    }
}

fn is_entrance(element: &RawElement) -> bool {
    element
        .tag("entrance")
        .is_some_and(|value| ENTRANCE_VALUES.contains(&value))
}
