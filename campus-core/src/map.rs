//! The loaded map: positions, buildings and amenities built in one pass.

use log::info;

use crate::collection::{CategoryFilter, EntityCollection, SearchOutcome};
use crate::element::RawElement;
use crate::entity::Entity;
use crate::nearest::{Anchor, NearestReport, nearest_amenities};
use crate::position::PositionStore;

/// Counts reported when a map has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapSummary {
    /// Number of indexed positions.
    pub positions: usize,
    /// Number of named buildings.
    pub buildings: usize,
    /// Number of named amenities.
    pub amenities: usize,
    /// Number of distinct amenity categories, including those of unnamed
    /// amenities.
    pub amenity_categories: usize,
}

/// Read-only view over everything derived from a map export.
///
/// # Examples
/// ```
/// use campus_core::{CampusMap, ElementKind, RawElement, Tags};
///
/// let elements = vec![
///     RawElement::new(1, ElementKind::Node { lat: 42.0, lon: -87.0 }, Tags::new()),
///     RawElement::new(
///         2,
///         ElementKind::Way { refs: vec![1] },
///         Tags::from([
///             ("building".into(), "university".into()),
///             ("name".into(), "Mudd".into()),
///         ]),
///     ),
/// ];
/// let map = CampusMap::from_elements(&elements, "university");
/// let summary = map.summary();
/// assert_eq!((summary.positions, summary.buildings, summary.amenities), (1, 1, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CampusMap {
    positions: PositionStore,
    buildings: EntityCollection,
    amenities: EntityCollection,
}

impl CampusMap {
    /// Build the position index and both collections from `elements`.
    ///
    /// Buildings are the elements tagged `building=<building_type>`.
    #[must_use]
    pub fn from_elements(elements: &[RawElement], building_type: &str) -> Self {
        let positions = PositionStore::build(elements);
        let buildings = EntityCollection::build(elements, &CategoryFilter::buildings(building_type));
        let amenities = EntityCollection::build(elements, &CategoryFilter::amenities());
        let map = Self::from_parts(positions, buildings, amenities);
        let summary = map.summary();
        info!(
            "Loaded map with {} positions, {} buildings and {} amenities",
            summary.positions, summary.buildings, summary.amenities
        );
        map
    }

    /// Assemble a map from prebuilt parts.
    #[must_use]
    pub const fn from_parts(
        positions: PositionStore,
        buildings: EntityCollection,
        amenities: EntityCollection,
    ) -> Self {
        Self {
            positions,
            buildings,
            amenities,
        }
    }

    /// Position index.
    #[must_use]
    pub const fn positions(&self) -> &PositionStore {
        &self.positions
    }

    /// Buildings sorted by name.
    #[must_use]
    pub const fn buildings(&self) -> &EntityCollection {
        &self.buildings
    }

    /// Amenities sorted by name.
    #[must_use]
    pub const fn amenities(&self) -> &EntityCollection {
        &self.amenities
    }

    /// Counts of positions, buildings, amenities and amenity categories.
    #[must_use]
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            positions: self.positions.len(),
            buildings: self.buildings.len(),
            amenities: self.amenities.len(),
            amenity_categories: self.amenities.categories().len(),
        }
    }

    /// Nearest amenity of `category` to every building whose name contains
    /// `building_query`.
    ///
    /// An empty query selects every building. Buildings without a resolvable
    /// location yield [`NearestOutcome::LocationUnknown`](crate::NearestOutcome::LocationUnknown).
    #[must_use]
    pub fn nearest(&self, building_query: &str, category: &str) -> NearestReport<'_> {
        let matched: Vec<&Entity> = match self.buildings.search(building_query) {
            SearchOutcome::Listing(all) => all.iter().collect(),
            SearchOutcome::Matches(found) => found,
            SearchOutcome::NoMatches => Vec::new(),
        };
        let anchors: Vec<Anchor> = matched
            .into_iter()
            .map(|building| Anchor::from_entity(building, &self.positions))
            .collect();
        nearest_amenities(&anchors, &self.amenities, &self.positions, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest::NearestOutcome;
    use crate::test_support::{amenity_node, bare_node, building_way, node, way};
    use rstest::{fixture, rstest};

    #[fixture]
    fn map() -> CampusMap {
        let elements = vec![
            bare_node(1, 42.0, -87.0),
            node(2, 42.0, -87.002, &[("entrance", "main")]),
            amenity_node(3, 42.01, -87.0, "Burger Barn", "fast_food"),
            amenity_node(4, 42.0, -87.001, "Taco Stop", "fast_food"),
            amenity_node(5, 42.0, -87.001, "Brew", "cafe"),
            building_way(10, &[1, 2], "Mudd Hall", "university"),
            building_way(11, &[404], "Mudd Annex", "university"),
            way(12, &[1], &[("building", "dormitory"), ("name", "Dorm")]),
        ];
        CampusMap::from_elements(&elements, "university")
    }

    #[rstest]
    fn summarises_counts(map: CampusMap) {
        assert_eq!(
            map.summary(),
            MapSummary {
                positions: 5,
                buildings: 2,
                amenities: 3,
                amenity_categories: 2,
            }
        );
    }

    #[rstest]
    fn building_type_is_configurable() {
        let elements = vec![building_way(12, &[1], "Dorm", "dormitory")];
        let map = CampusMap::from_elements(&elements, "dormitory");
        assert_eq!(map.buildings().len(), 1);
    }

    #[rstest]
    fn nearest_reports_each_matching_building(map: CampusMap) {
        let NearestReport::Results(outcomes) = map.nearest("mudd", "fast_food") else {
            panic!("buildings should match");
        };
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes.first(),
            Some(&NearestOutcome::LocationUnknown {
                anchor: "Mudd Annex".into()
            })
        );
        assert!(matches!(
            outcomes.get(1),
            Some(NearestOutcome::Found { anchor, amenity, .. })
                if anchor == "Mudd Hall" && amenity.name() == "Taco Stop"
        ));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_query_searches_from_every_building(map: CampusMap, #[case] query: &str) {
        let NearestReport::Results(outcomes) = map.nearest(query, "fast_food") else {
            panic!("every building should be searched");
        };
        assert_eq!(
            outcomes.first(),
            Some(&NearestOutcome::LocationUnknown {
                anchor: "Mudd Annex".into()
            })
        );
        assert!(matches!(
            outcomes.get(1),
            Some(NearestOutcome::Found { anchor, amenity, .. })
                if anchor == "Mudd Hall" && amenity.name() == "Taco Stop"
        ));
        assert_eq!(outcomes.len(), 2);
    }

    #[rstest]
    fn empty_query_on_a_map_without_buildings_matches_nothing() {
        let elements = vec![
            bare_node(1, 42.0, -87.0),
            amenity_node(4, 42.0, -87.001, "Taco Stop", "fast_food"),
        ];
        let map = CampusMap::from_elements(&elements, "university");
        assert_eq!(map.nearest("", "fast_food"), NearestReport::NoMatchingAnchor);
    }

    #[rstest]
    fn nearest_without_building_match(map: CampusMap) {
        assert_eq!(
            map.nearest("Nowhere", "fast_food"),
            NearestReport::NoMatchingAnchor
        );
    }
}
