//! Nearest amenity of a category to one or more anchor locations.
//!
//! The search is a linear scan over the amenity collection. Amenity centroids
//! are resolved once per query and reused for every anchor.

use geo::Coord;
use log::debug;

use crate::collection::EntityCollection;
use crate::distance::distance_between;
use crate::entity::Entity;
use crate::position::PositionStore;

/// A labelled location to search from.
///
/// The location is `None` when it could not be derived, for instance for a
/// building none of whose nodes are known. Such anchors are answered with
/// [`NearestOutcome::LocationUnknown`].
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Label shown alongside the results, usually a building name.
    pub label: String,
    /// Location to measure from (`x = longitude`, `y = latitude`).
    pub location: Option<Coord<f64>>,
}

impl Anchor {
    /// Construct an anchor from latitude and longitude in degrees.
    #[must_use]
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            label: label.into(),
            location: Some(Coord { x: lon, y: lat }),
        }
    }

    /// Construct an anchor whose location is unknown.
    #[must_use]
    pub fn unlocated(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: None,
        }
    }

    /// Anchor an entity at its centroid, labelled with its name.
    ///
    /// An entity without resolvable nodes yields an unlocated anchor.
    #[must_use]
    pub fn from_entity(entity: &Entity, store: &PositionStore) -> Self {
        Self {
            label: entity.name().to_owned(),
            location: entity
                .centroid(store)
                .inspect_err(|err| debug!("Anchor without location: {err}"))
                .ok(),
        }
    }
}

/// Outcome of the search for a single anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestOutcome<'a> {
    /// The closest amenity of the requested category.
    Found {
        /// Label of the anchor searched from.
        anchor: String,
        /// Closest amenity; the first one wins on exact ties.
        amenity: &'a Entity,
        /// Great-circle distance in miles.
        distance_miles: f64,
    },
    /// No amenity of the category had a known location.
    NoAmenityFound {
        /// Label of the anchor searched from.
        anchor: String,
    },
    /// The anchor's own location could not be derived.
    LocationUnknown {
        /// Label of the anchor that could not be placed.
        anchor: String,
    },
}

/// Outcome of a whole nearest-amenity query.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestReport<'a> {
    /// No anchor matched the query.
    NoMatchingAnchor,
    /// One outcome per anchor, in anchor order.
    Results(Vec<NearestOutcome<'a>>),
}

/// Find, for every anchor, the closest amenity whose category equals
/// `category` exactly.
///
/// Amenities whose location is unknown are skipped. Anchors without a
/// location yield [`NearestOutcome::LocationUnknown`]. An empty anchor set
/// yields [`NearestReport::NoMatchingAnchor`].
///
/// # Examples
/// ```
/// use campus_core::{
///     Anchor, Entity, EntityCollection, EntityKind, NearestOutcome, NearestReport, Position,
///     PositionStore, nearest_amenities,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PositionStore::from_positions([
///     Position::new(1, 0.0, 0.01, false),
///     Position::new(2, 0.0, 0.02, false),
/// ]);
/// let mut near = Entity::amenity(1, "Near", "", "fast_food")?;
/// near.add_member(1);
/// let mut far = Entity::amenity(2, "Far", "", "fast_food")?;
/// far.add_member(2);
/// let amenities = EntityCollection::from_entities(EntityKind::Amenity, vec![far, near]);
///
/// let report = nearest_amenities(&[Anchor::new("Origin", 0.0, 0.0)], &amenities, &store, "fast_food");
/// let NearestReport::Results(outcomes) = report else { panic!("anchor supplied") };
/// assert!(matches!(
///     outcomes.as_slice(),
///     [NearestOutcome::Found { amenity, .. }] if amenity.name() == "Near"
/// ));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn nearest_amenities<'a>(
    anchors: &[Anchor],
    amenities: &'a EntityCollection,
    store: &PositionStore,
    category: &str,
) -> NearestReport<'a> {
    if anchors.is_empty() {
        return NearestReport::NoMatchingAnchor;
    }
    let candidates = locate_candidates(amenities, store, category);
    NearestReport::Results(
        anchors
            .iter()
            .map(|anchor| nearest_to(anchor, &candidates))
            .collect(),
    )
}

/// Amenities of `category` paired with their resolved centroids.
fn locate_candidates<'a>(
    amenities: &'a EntityCollection,
    store: &PositionStore,
    category: &str,
) -> Vec<(&'a Entity, Coord<f64>)> {
    let candidates: Vec<_> = amenities
        .iter()
        .filter(|amenity| amenity.category() == Some(category))
        .filter_map(|amenity| {
            amenity
                .centroid(store)
                .inspect_err(|err| debug!("Skipped candidate: {err}"))
                .ok()
                .map(|location| (amenity, location))
        })
        .collect();
    debug!(
        "Resolved {} {category} candidates for nearest search",
        candidates.len()
    );
    candidates
}

fn nearest_to<'a>(anchor: &Anchor, candidates: &[(&'a Entity, Coord<f64>)]) -> NearestOutcome<'a> {
    let Some(origin) = anchor.location else {
        return NearestOutcome::LocationUnknown {
            anchor: anchor.label.clone(),
        };
    };
    let mut best: Option<(&'a Entity, f64)> = None;
    for (amenity, location) in candidates {
        let distance = distance_between(origin, *location);
        // Strict comparison keeps the first candidate on exact ties.
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((*amenity, distance));
        }
    }
    best.map_or_else(
        || NearestOutcome::NoAmenityFound {
            anchor: anchor.label.clone(),
        },
        |(amenity, distance_miles)| NearestOutcome::Found {
            anchor: anchor.label.clone(),
            amenity,
            distance_miles,
        },
    )
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "tests place fixtures by distance and fail fast when setup breaks"
)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::position::Position;
    use rstest::{fixture, rstest};

    /// Degrees of latitude per mile along a meridian.
    const DEGREES_PER_MILE: f64 = 1.0 / 69.093;

    fn amenity(id: i64, name: &str, category: &str, member: i64) -> Entity {
        let mut entity = Entity::amenity(id, name, "", category).expect("valid amenity");
        entity.add_member(member);
        entity
    }

    #[fixture]
    fn store() -> PositionStore {
        PositionStore::from_positions([
            Position::new(1, DEGREES_PER_MILE, 0.0, false),
            Position::new(2, 0.5 * DEGREES_PER_MILE, 0.0, false),
            Position::new(3, 2.0 * DEGREES_PER_MILE, 0.0, false),
            Position::new(4, 0.1 * DEGREES_PER_MILE, 0.0, false),
        ])
    }

    #[fixture]
    fn amenities() -> EntityCollection {
        EntityCollection::from_entities(
            EntityKind::Amenity,
            vec![
                amenity(10, "One Mile", "fast_food", 1),
                amenity(11, "Half Mile", "fast_food", 2),
                amenity(12, "Two Miles", "fast_food", 3),
                amenity(13, "Cafe", "cafe", 4),
                amenity(14, "Lost", "fast_food", 404),
            ],
        )
    }

    fn origin() -> Anchor {
        Anchor::new("Origin", 0.0, 0.0)
    }

    #[rstest]
    fn picks_the_closest_amenity(amenities: EntityCollection, store: PositionStore) {
        let report = nearest_amenities(&[origin()], &amenities, &store, "fast_food");
        let NearestReport::Results(outcomes) = report else {
            panic!("anchor was supplied");
        };
        match outcomes.as_slice() {
            [NearestOutcome::Found {
                anchor,
                amenity,
                distance_miles,
            }] => {
                assert_eq!(anchor, "Origin");
                assert_eq!(amenity.name(), "Half Mile");
                assert!((distance_miles - 0.5).abs() < 1.0e-3, "got {distance_miles}");
            }
            other => panic!("unexpected outcomes {other:?}"),
        }
    }

    #[rstest]
    fn category_must_match_exactly(amenities: EntityCollection, store: PositionStore) {
        let report = nearest_amenities(&[origin()], &amenities, &store, "Fast_Food");
        assert_eq!(
            report,
            NearestReport::Results(vec![NearestOutcome::NoAmenityFound {
                anchor: "Origin".into()
            }])
        );
    }

    #[rstest]
    fn unresolvable_amenities_are_not_found(store: PositionStore) {
        let amenities = EntityCollection::from_entities(
            EntityKind::Amenity,
            vec![amenity(14, "Lost", "fast_food", 404)],
        );
        let report = nearest_amenities(&[origin()], &amenities, &store, "fast_food");
        assert!(matches!(
            report,
            NearestReport::Results(outcomes)
                if matches!(outcomes.as_slice(), [NearestOutcome::NoAmenityFound { .. }])
        ));
    }

    #[rstest]
    fn empty_anchor_set_is_reported_once(amenities: EntityCollection, store: PositionStore) {
        let report = nearest_amenities(&[], &amenities, &store, "fast_food");
        assert_eq!(report, NearestReport::NoMatchingAnchor);
    }

    #[rstest]
    fn ties_keep_the_first_candidate(store: PositionStore) {
        let amenities = EntityCollection::from_entities(
            EntityKind::Amenity,
            vec![
                amenity(20, "Alpha", "fast_food", 1),
                amenity(21, "Beta", "fast_food", 1),
            ],
        );
        let outcome = nearest_to(
            &origin(),
            &locate_candidates(&amenities, &store, "fast_food"),
        );
        assert!(matches!(
            outcome,
            NearestOutcome::Found { amenity, .. } if amenity.name() == "Alpha"
        ));
    }

    #[rstest]
    fn each_anchor_gets_its_own_answer(amenities: EntityCollection, store: PositionStore) {
        let anchors = [origin(), Anchor::new("North", 2.0 * DEGREES_PER_MILE, 0.0)];
        let NearestReport::Results(outcomes) =
            nearest_amenities(&anchors, &amenities, &store, "fast_food")
        else {
            panic!("anchors were supplied");
        };
        let names: Vec<&str> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                NearestOutcome::Found { amenity, .. } => Some(amenity.name()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["Half Mile", "Two Miles"]);
    }

    #[rstest]
    fn anchors_from_unlocated_entities_have_no_location() {
        let mut lost = Entity::building(5, "Lost Hall", "").expect("valid building");
        lost.add_member(404);
        let anchor = Anchor::from_entity(&lost, &PositionStore::default());
        assert_eq!(anchor, Anchor::unlocated("Lost Hall"));
    }

    #[rstest]
    fn unlocated_anchors_are_reported_alongside_located_ones(
        amenities: EntityCollection,
        store: PositionStore,
    ) {
        let anchors = [Anchor::unlocated("Lost Hall"), origin()];
        let NearestReport::Results(outcomes) =
            nearest_amenities(&anchors, &amenities, &store, "fast_food")
        else {
            panic!("anchors were supplied");
        };
        assert_eq!(
            outcomes.first(),
            Some(&NearestOutcome::LocationUnknown {
                anchor: "Lost Hall".into()
            })
        );
        assert!(matches!(
            outcomes.get(1),
            Some(NearestOutcome::Found { amenity, .. }) if amenity.name() == "Half Mile"
        ));
    }
}
