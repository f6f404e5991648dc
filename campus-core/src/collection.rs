//! Sorted collections of buildings or amenities derived from raw elements.

use log::{debug, warn};

use crate::element::{ElementKind, RawElement};
use crate::entity::{Entity, EntityError, EntityKind};

/// Tag key holding an entity's display name.
const NAME_KEY: &str = "name";
/// Tag key holding the house number part of an address.
const HOUSE_NUMBER_KEY: &str = "addr:housenumber";
/// Tag key holding the street part of an address.
const STREET_KEY: &str = "addr:street";

/// Selects which elements become entities of a collection.
///
/// # Examples
/// ```
/// use campus_core::{CategoryFilter, EntityKind};
///
/// let buildings = CategoryFilter::buildings("university");
/// assert_eq!(buildings.kind(), EntityKind::Building);
/// assert_eq!(CategoryFilter::amenities().kind(), EntityKind::Amenity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep elements whose `key` tag equals `value`; entities carry no category.
    Tag {
        /// Tag key to inspect, e.g. `building`.
        key: String,
        /// Required value, e.g. `university`.
        value: String,
    },
    /// Keep elements with any non-empty `key` tag and use it as the category.
    Category {
        /// Tag key holding the category, e.g. `amenity`.
        key: String,
    },
}

impl CategoryFilter {
    /// Buildings tagged `building=<building_type>`.
    #[must_use]
    pub fn buildings(building_type: &str) -> Self {
        Self::Tag {
            key: "building".to_owned(),
            value: building_type.to_owned(),
        }
    }

    /// Amenities categorised by their `amenity` tag.
    #[must_use]
    pub fn amenities() -> Self {
        Self::Category {
            key: "amenity".to_owned(),
        }
    }

    /// Kind of entity produced by this filter.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Tag { .. } => EntityKind::Building,
            Self::Category { .. } => EntityKind::Amenity,
        }
    }

    /// Return `Some(category)` when `element` passes the filter.
    ///
    /// The inner value is `None` for tag filters, which carry no category.
    fn select<'a>(&self, element: &'a RawElement) -> Option<Option<&'a str>> {
        match self {
            Self::Tag { key, value } => element.has_tag(key, value).then_some(None),
            Self::Category { key } => element.tag(key).map(Some),
        }
    }
}

/// Result of [`EntityCollection::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The query was empty; every entity is listed.
    Listing(&'a [Entity]),
    /// Entities matching a non-empty query, in collection order.
    Matches(Vec<&'a Entity>),
    /// A non-empty query matched nothing.
    NoMatches,
}

/// Entities of one kind, sorted by name.
///
/// # Examples
/// ```
/// use campus_core::{CategoryFilter, ElementKind, EntityCollection, RawElement, SearchOutcome, Tags};
///
/// let elements = [RawElement::new(
///     1,
///     ElementKind::Node { lat: 42.05, lon: -87.68 },
///     Tags::from([
///         ("amenity".into(), "cafe".into()),
///         ("name".into(), "Unicorn Cafe".into()),
///     ]),
/// )];
/// let amenities = EntityCollection::build(&elements, &CategoryFilter::amenities());
/// assert_eq!(amenities.categories(), ["cafe"]);
/// assert!(matches!(amenities.search("CAF"), SearchOutcome::Matches(found) if found.len() == 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection {
    kind: EntityKind,
    entities: Vec<Entity>,
    categories: Vec<String>,
}

impl EntityCollection {
    /// Build a collection from every node and way accepted by `filter`.
    ///
    /// Elements without a non-empty `name` tag do not become entities, but
    /// their category still counts towards [`categories`](Self::categories).
    /// Nodes become single-member entities; ways contribute every node
    /// reference in document order. Entities are stably sorted by name.
    pub fn build<'a, I>(elements: I, filter: &CategoryFilter) -> Self
    where
        I: IntoIterator<Item = &'a RawElement>,
    {
        let kind = filter.kind();
        let mut entities = Vec::new();
        let mut categories = Vec::new();
        for element in elements {
            if matches!(element.kind, ElementKind::Other { .. }) {
                continue;
            }
            let Some(category) = filter.select(element) else {
                continue;
            };
            categories.extend(category.map(str::to_owned));
            let Some(name) = element.tag(NAME_KEY) else {
                continue;
            };
            let built = entity_from_element(element, name, category)
                .inspect_err(|err| warn!("Skipped {kind} element {}: {err}", element.id));
            entities.extend(built.ok());
        }
        Self::assemble(kind, entities, categories)
    }

    /// Assemble a collection from already constructed entities.
    ///
    /// Entities are stably sorted by name and their distinct categories are
    /// collected in ascending order.
    #[must_use]
    pub fn from_entities(kind: EntityKind, entities: Vec<Entity>) -> Self {
        let categories = entities
            .iter()
            .filter_map(Entity::category)
            .map(str::to_owned)
            .collect();
        Self::assemble(kind, entities, categories)
    }

    fn assemble(kind: EntityKind, mut entities: Vec<Entity>, mut categories: Vec<String>) -> Self {
        entities.sort_by(|left, right| left.name().cmp(right.name()));
        categories.sort_unstable();
        categories.dedup();
        debug!(
            "Collected {} {kind} entities across {} categories",
            entities.len(),
            categories.len()
        );
        Self {
            kind,
            entities,
            categories,
        }
    }

    /// Search by case-insensitive substring.
    ///
    /// Buildings match on name and amenities on category. Surrounding
    /// whitespace is ignored; an empty query lists every entity.
    #[must_use]
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return SearchOutcome::Listing(&self.entities);
        }
        let matches: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|entity| self.search_key(entity).to_lowercase().contains(&needle))
            .collect();
        if matches.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Matches(matches)
        }
    }

    fn search_key<'e>(&self, entity: &'e Entity) -> &'e str {
        match self.kind {
            EntityKind::Building => entity.name(),
            EntityKind::Amenity => entity.category().unwrap_or_default(),
        }
    }

    /// Kind of entity held by the collection.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Entities in name order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over entities in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    /// Distinct categories in ascending order; empty for buildings.
    ///
    /// Categories of unnamed elements are included even though those
    /// elements are not kept as entities.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of entities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    /// Return true when the collection holds no entities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn entity_from_element(
    element: &RawElement,
    name: &str,
    category: Option<&str>,
) -> Result<Entity, EntityError> {
    let address = street_address(element);
    let mut entity = category.map_or_else(
        || Entity::building(element.id, name, address.as_str()),
        |category| Entity::amenity(element.id, name, address.as_str(), category),
    )?;
    // Nodes stand for themselves; ways list their nodes in document order.
    let members = element
        .way_refs()
        .unwrap_or_else(|| std::slice::from_ref(&element.id));
    for id in members {
        entity.add_member(*id);
    }
    Ok(entity)
}

/// `"<house number> <street>"`, dropping whichever part is missing.
fn street_address(element: &RawElement) -> String {
    match (element.tag(HOUSE_NUMBER_KEY), element.tag(STREET_KEY)) {
        (Some(number), Some(street)) => format!("{number} {street}"),
        (Some(part), None) | (None, Some(part)) => part.to_owned(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests should fail fast when setup breaks")]
mod tests {
    use super::*;
    use crate::element::Tags;
    use rstest::{fixture, rstest};

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    fn building_way(id: i64, name: Option<&str>, refs: &[i64]) -> RawElement {
        let mut pairs = vec![("building", "university")];
        if let Some(name) = name {
            pairs.push(("name", name));
        }
        RawElement::new(id, ElementKind::Way { refs: refs.to_vec() }, tags(&pairs))
    }

    fn amenity_node(id: i64, name: &str, category: &str) -> RawElement {
        RawElement::new(
            id,
            ElementKind::Node { lat: 0.0, lon: 0.0 },
            tags(&[("amenity", category), ("name", name)]),
        )
    }

    #[fixture]
    fn campus() -> Vec<RawElement> {
        vec![
            building_way(10, Some("Mudd"), &[1, 2, 3]),
            building_way(11, Some("Tech"), &[4, 5]),
            building_way(12, None, &[6]),
            building_way(13, Some("Annenberg"), &[7]),
            RawElement::new(
                14,
                ElementKind::Way { refs: vec![8] },
                tags(&[("building", "yes"), ("name", "Garage")]),
            ),
            amenity_node(20, "Starbucks", "cafe"),
            amenity_node(21, "Chipotle", "fast_food"),
            amenity_node(22, "Panda Express", "fast_food"),
            amenity_node(23, "", "bench"),
            RawElement::new(
                24,
                ElementKind::Other {
                    name: "relation".into(),
                },
                tags(&[("amenity", "library"), ("name", "Ghost")]),
            ),
        ]
    }

    #[rstest]
    fn builds_sorted_named_buildings(campus: Vec<RawElement>) {
        let buildings = EntityCollection::build(&campus, &CategoryFilter::buildings("university"));
        let names: Vec<&str> = buildings.iter().map(Entity::name).collect();
        assert_eq!(names, vec!["Annenberg", "Mudd", "Tech"]);
        assert_eq!(buildings.kind(), EntityKind::Building);
        assert!(buildings.categories().is_empty());
    }

    #[rstest]
    fn way_members_keep_document_order() {
        let elements = [building_way(10, Some("Mudd"), &[3, 1, 2])];
        let buildings = EntityCollection::build(&elements, &CategoryFilter::buildings("university"));
        let mudd = buildings.entities().first().expect("named building kept");
        assert_eq!(mudd.members(), &[3, 1, 2]);
    }

    #[rstest]
    fn node_entities_reference_themselves(campus: Vec<RawElement>) {
        let amenities = EntityCollection::build(&campus, &CategoryFilter::amenities());
        let starbucks = amenities
            .iter()
            .find(|entity| entity.name() == "Starbucks")
            .expect("named amenity kept");
        assert_eq!(starbucks.members(), &[20]);
    }

    #[rstest]
    fn collects_distinct_categories_of_every_amenity(campus: Vec<RawElement>) {
        let amenities = EntityCollection::build(&campus, &CategoryFilter::amenities());
        assert_eq!(amenities.len(), 3);
        assert_eq!(amenities.categories(), ["bench", "cafe", "fast_food"]);
    }

    #[rstest]
    fn unnamed_amenities_contribute_only_their_category() {
        let elements = [
            amenity_node(5, "Taco Stop", "fast_food"),
            RawElement::new(
                6,
                ElementKind::Node { lat: 0.0, lon: 0.0 },
                tags(&[("amenity", "bench")]),
            ),
        ];
        let amenities = EntityCollection::build(&elements, &CategoryFilter::amenities());
        assert_eq!(amenities.categories(), ["bench", "fast_food"]);
        let ids: Vec<i64> = amenities.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![5]);
        assert_eq!(amenities.search("bench"), SearchOutcome::NoMatches);
    }

    #[rstest]
    fn relations_contribute_no_category(campus: Vec<RawElement>) {
        let amenities = EntityCollection::build(&campus, &CategoryFilter::amenities());
        assert!(!amenities.categories().iter().any(|category| category == "library"));
    }

    #[rstest]
    fn equal_names_keep_encounter_order() {
        let elements = [
            amenity_node(2, "Same", "cafe"),
            amenity_node(1, "Same", "bar"),
        ];
        let amenities = EntityCollection::build(&elements, &CategoryFilter::amenities());
        let ids: Vec<i64> = amenities.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[rstest]
    #[case(Some("2233"), Some("Tech Dr"), "2233 Tech Dr")]
    #[case(None, Some("Tech Dr"), "Tech Dr")]
    #[case(Some("2233"), None, "2233")]
    #[case(None, None, "")]
    fn composes_street_address(
        #[case] number: Option<&str>,
        #[case] street: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut pairs = vec![("amenity", "cafe"), ("name", "Cafe")];
        if let Some(number) = number {
            pairs.push(("addr:housenumber", number));
        }
        if let Some(street) = street {
            pairs.push(("addr:street", street));
        }
        let element = RawElement::new(1, ElementKind::Node { lat: 0.0, lon: 0.0 }, tags(&pairs));
        assert_eq!(street_address(&element), expected);
    }

    #[rstest]
    fn empty_query_lists_everything(campus: Vec<RawElement>) {
        let buildings = EntityCollection::build(&campus, &CategoryFilter::buildings("university"));
        assert_eq!(buildings.search("   "), SearchOutcome::Listing(buildings.entities()));
    }

    #[rstest]
    #[case("mud", &["Mudd"])]
    #[case(" TECH ", &["Tech"])]
    #[case("e", &["Annenberg", "Tech"])]
    fn building_search_matches_names(
        campus: Vec<RawElement>,
        #[case] query: &str,
        #[case] expected: &[&str],
    ) {
        let buildings = EntityCollection::build(&campus, &CategoryFilter::buildings("university"));
        let SearchOutcome::Matches(found) = buildings.search(query) else {
            panic!("expected matches for {query:?}");
        };
        let names: Vec<&str> = found.iter().map(|entity| entity.name()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    fn amenity_search_matches_categories(campus: Vec<RawElement>) {
        let amenities = EntityCollection::build(&campus, &CategoryFilter::amenities());
        let SearchOutcome::Matches(found) = amenities.search("FAST") else {
            panic!("expected fast food matches");
        };
        let names: Vec<&str> = found.iter().map(|entity| entity.name()).collect();
        assert_eq!(names, vec!["Chipotle", "Panda Express"]);
        assert_eq!(amenities.search("Starbucks"), SearchOutcome::NoMatches);
    }

    #[rstest]
    fn unmatched_query_is_a_typed_outcome(campus: Vec<RawElement>) {
        let buildings = EntityCollection::build(&campus, &CategoryFilter::buildings("university"));
        assert_eq!(buildings.search("zzz"), SearchOutcome::NoMatches);
    }
}
