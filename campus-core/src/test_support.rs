//! Element builders shared by unit, integration and behaviour tests.

use crate::element::{ElementKind, RawElement, Tags};

/// Collect `(key, value)` pairs into a tag map.
#[must_use]
pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

/// A node at `(lat, lon)` carrying `pairs` as tags.
#[must_use]
pub fn node(id: i64, lat: f64, lon: f64, pairs: &[(&str, &str)]) -> RawElement {
    RawElement::new(id, ElementKind::Node { lat, lon }, tags(pairs))
}

/// An untagged node at `(lat, lon)`.
#[must_use]
pub fn bare_node(id: i64, lat: f64, lon: f64) -> RawElement {
    node(id, lat, lon, &[])
}

/// A way referencing `refs` in order.
#[must_use]
pub fn way(id: i64, refs: &[i64], pairs: &[(&str, &str)]) -> RawElement {
    RawElement::new(
        id,
        ElementKind::Way {
            refs: refs.to_vec(),
        },
        tags(pairs),
    )
}

/// A named way tagged `building=<building_type>`.
#[must_use]
pub fn building_way(id: i64, refs: &[i64], name: &str, building_type: &str) -> RawElement {
    way(id, refs, &[("building", building_type), ("name", name)])
}

/// A named node tagged `amenity=<category>`.
#[must_use]
pub fn amenity_node(id: i64, lat: f64, lon: f64, name: &str, category: &str) -> RawElement {
    node(id, lat, lon, &[("amenity", category), ("name", name)])
}

/// A relation or other non-positional element.
#[must_use]
pub fn other(id: i64, name: &str, pairs: &[(&str, &str)]) -> RawElement {
    RawElement::new(
        id,
        ElementKind::Other {
            name: name.to_owned(),
        },
        tags(pairs),
    )
}
