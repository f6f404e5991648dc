//! Named map features backed by one or more position references.
//!
//! Buildings and amenities share one shape: an identifier, a display name, a
//! street address, and the member nodes that outline or pin the feature.
//! Amenities additionally carry a category such as `fast_food`.

use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::position::PositionStore;

/// Marker printed for member nodes missing from the position store.
pub const NODE_NOT_FOUND: &str = "**NODE NOT FOUND**";

/// Decimal places used for latitudes and longitudes in [`Detail`] output.
pub const COORDINATE_DECIMALS: usize = 6;

/// The collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A building, selected by a tag filter such as `building=university`.
    Building,
    /// An amenity, categorised by its `amenity` tag.
    Amenity,
}

impl EntityKind {
    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Amenity => "amenity",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the [`Entity`] constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The display name was empty.
    #[error("{kind} {id} must have a non-empty name")]
    EmptyName {
        /// Identifier of the rejected entity.
        id: i64,
        /// Kind of the rejected entity.
        kind: EntityKind,
    },
    /// An amenity was created without a category.
    #[error("amenity {id} must have a non-empty category")]
    EmptyCategory {
        /// Identifier of the rejected amenity.
        id: i64,
    },
}

/// Raised when an entity's location cannot be derived.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CentroidError {
    /// None of the member nodes resolved in the position store.
    #[error("location of entity {entity} is unknown: none of its nodes were found")]
    NoResolvableMembers {
        /// Identifier of the entity whose location is unknown.
        entity: i64,
    },
}

/// A named, addressed map feature.
///
/// # Examples
/// ```
/// use campus_core::{Entity, Position, PositionStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut mudd = Entity::building(99, "Mudd", "2233 Tech Dr")?;
/// mudd.add_member(1);
/// mudd.add_member(2);
///
/// let store = PositionStore::from_positions([
///     Position::new(1, 0.0, 0.0, false),
///     Position::new(2, 2.0, 2.0, true),
/// ]);
/// let centroid = mudd.centroid(&store)?;
/// assert_eq!((centroid.y, centroid.x), (1.0, 1.0));
/// assert_eq!(mudd.summary().to_string(), "Mudd: 2233 Tech Dr");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: i64,
    name: String,
    street_address: String,
    category: Option<String>,
    kind: EntityKind,
    members: Vec<i64>,
}

impl Entity {
    /// Construct a building with no members yet.
    ///
    /// # Errors
    /// Returns [`EntityError::EmptyName`] when `name` is empty.
    pub fn building(
        id: i64,
        name: impl Into<String>,
        street_address: impl Into<String>,
    ) -> Result<Self, EntityError> {
        Self::new(id, name.into(), street_address.into(), EntityKind::Building, None)
    }

    /// Construct an amenity of the given category with no members yet.
    ///
    /// # Errors
    /// Returns [`EntityError::EmptyName`] or [`EntityError::EmptyCategory`]
    /// when either string is empty.
    pub fn amenity(
        id: i64,
        name: impl Into<String>,
        street_address: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, EntityError> {
        let category_name = category.into();
        if category_name.is_empty() {
            return Err(EntityError::EmptyCategory { id });
        }
        Self::new(
            id,
            name.into(),
            street_address.into(),
            EntityKind::Amenity,
            Some(category_name),
        )
    }

    fn new(
        id: i64,
        name: String,
        street_address: String,
        kind: EntityKind,
        category: Option<String>,
    ) -> Result<Self, EntityError> {
        if name.is_empty() {
            return Err(EntityError::EmptyName { id, kind });
        }
        Ok(Self {
            id,
            name,
            street_address,
            category,
            kind,
            members: Vec::new(),
        })
    }

    /// Append a member node reference.
    pub fn add_member(&mut self, position_id: i64) {
        self.members.push(position_id);
    }

    /// Identifier of the defining node or way.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Display name; never empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street address, possibly empty.
    #[must_use]
    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    /// Amenity category; `None` for buildings.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Collection this entity belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Member node identifiers in insertion order.
    #[must_use]
    pub fn members(&self) -> &[i64] {
        &self.members
    }

    /// Member node identifiers sorted numerically.
    #[must_use]
    pub fn sorted_members(&self) -> Vec<i64> {
        let mut sorted = self.members.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Arithmetic mean of the member positions that resolve in `store`.
    ///
    /// Members missing from the store are left out of both the sum and the
    /// count. The result uses `x = longitude`, `y = latitude`.
    ///
    /// # Errors
    /// Returns [`CentroidError::NoResolvableMembers`] when no member resolves.
    #[expect(
        clippy::float_arithmetic,
        reason = "averaging coordinates requires float maths"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "member counts are far below 2^52"
    )]
    pub fn centroid(&self, store: &PositionStore) -> Result<Coord<f64>, CentroidError> {
        let (sum, count) = self
            .members
            .iter()
            .filter_map(|id| store.lookup(*id))
            .fold((Coord { x: 0.0, y: 0.0 }, 0_usize), |(sum, count), position| {
                (sum + position.location, count + 1)
            });

        if count == 0 {
            return Err(CentroidError::NoResolvableMembers { entity: self.id });
        }
        let divisor = count as f64;
        Ok(Coord {
            x: sum.x / divisor,
            y: sum.y / divisor,
        })
    }

    /// One-line summary: name, category if any, and address.
    #[must_use]
    pub const fn summary(&self) -> Summary<'_> {
        Summary { entity: self }
    }

    /// Multi-line detail listing including the centroid and every member.
    #[must_use]
    pub const fn detail<'a>(&'a self, store: &'a PositionStore) -> Detail<'a> {
        Detail {
            entity: self,
            store,
        }
    }

    fn write_heading(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(category) = &self.category {
            write!(f, " ({category})")?;
        }
        Ok(())
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Entity::summary`].
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    entity: &'a Entity,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity.write_heading(f)?;
        write!(f, ": {}", self.entity.street_address)
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Entity::detail`].
///
/// Every line ends with a newline. Coordinates are printed with
/// [`COORDINATE_DECIMALS`] decimal places. Members missing from the store are
/// listed with [`NODE_NOT_FOUND`] rather than omitted.
#[derive(Debug, Clone, Copy)]
pub struct Detail<'a> {
    entity: &'a Entity,
    store: &'a PositionStore,
}

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entity = self.entity;
        entity.write_heading(f)?;
        writeln!(f)?;
        writeln!(f, " OSM ID: {}", entity.id)?;
        writeln!(f, " Address: {}", entity.street_address)?;
        match entity.centroid(self.store) {
            Ok(centroid) => writeln!(
                f,
                " GPS Location: {:.*}, {:.*}",
                COORDINATE_DECIMALS, centroid.y, COORDINATE_DECIMALS, centroid.x
            )?,
            Err(CentroidError::NoResolvableMembers { .. }) => {
                writeln!(f, " GPS Location: unknown")?;
            }
        }
        writeln!(f, " Nodes:")?;
        for id in entity.sorted_members() {
            match self.store.lookup(id) {
                Some(position) => {
                    write!(
                        f,
                        "  {id}: ({:.*}, {:.*})",
                        COORDINATE_DECIMALS,
                        position.lat(),
                        COORDINATE_DECIMALS,
                        position.lon()
                    )?;
                    if position.is_entrance {
                        f.write_str(", is entrance")?;
                    }
                    writeln!(f)?;
                }
                None => writeln!(f, "  {id}: {NODE_NOT_FOUND}")?,
            }
        }
        Ok(())
    }
}
