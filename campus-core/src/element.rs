//! Raw map elements handed over by a map reader.
//!
//! The core never parses markup itself. Readers such as `campus-data` turn an
//! export into a sequence of [`RawElement`] values and the builders in this
//! crate consume them.

use std::collections::HashMap;

/// Free-form key/value tags mirroring OpenStreetMap's structure.
pub type Tags = HashMap<String, String>;

/// Shape-specific payload of a [`RawElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A single position on the map.
    Node {
        /// Latitude in degrees, north positive.
        lat: f64,
        /// Longitude in degrees, east positive.
        lon: f64,
    },
    /// An ordered list of node references, usually a perimeter.
    Way {
        /// Referenced node identifiers in document order.
        refs: Vec<i64>,
    },
    /// Any other element kind; ignored by every builder.
    Other {
        /// Element name as it appeared in the source.
        name: String,
    },
}

/// One element of a map export: identifier, shape and tags.
///
/// # Examples
/// ```
/// use campus_core::{ElementKind, RawElement, Tags};
///
/// let element = RawElement::new(
///     7,
///     ElementKind::Node { lat: 42.05, lon: -87.68 },
///     Tags::from([("amenity".into(), "cafe".into()), ("name".into(), String::new())]),
/// );
/// assert_eq!(element.tag("amenity"), Some("cafe"));
/// assert_eq!(element.tag("name"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    /// Identifier assigned by the source map.
    pub id: i64,
    /// Node, way or other payload.
    pub kind: ElementKind,
    /// Tags attached to the element.
    pub tags: Tags,
}

impl RawElement {
    /// Construct an element from its parts.
    #[must_use]
    pub const fn new(id: i64, kind: ElementKind, tags: Tags) -> Self {
        Self { id, kind, tags }
    }

    /// Return the value stored under `key`, treating an empty value as absent.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Return true when `key` carries exactly `value`.
    #[must_use]
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tag(key) == Some(value)
    }

    /// Return the referenced node identifiers for a way, or `None` otherwise.
    #[must_use]
    pub fn way_refs(&self) -> Option<&[i64]> {
        match &self.kind {
            ElementKind::Way { refs } => Some(refs),
            ElementKind::Node { .. } | ElementKind::Other { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tagged(tags: &[(&str, &str)]) -> RawElement {
        RawElement::new(
            1,
            ElementKind::Node { lat: 0.0, lon: 0.0 },
            tags.iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect(),
        )
    }

    #[rstest]
    #[case(&[("name", "Mudd")], Some("Mudd"))]
    #[case(&[("name", "")], None)]
    #[case(&[], None)]
    fn tag_treats_empty_as_absent(#[case] tags: &[(&str, &str)], #[case] expected: Option<&str>) {
        assert_eq!(tagged(tags).tag("name"), expected);
    }

    #[rstest]
    fn has_tag_requires_exact_value() {
        let element = tagged(&[("building", "university")]);
        assert!(element.has_tag("building", "university"));
        assert!(!element.has_tag("building", "University"));
        assert!(!element.has_tag("amenity", "university"));
    }

    #[rstest]
    fn way_refs_only_for_ways() {
        let way = RawElement::new(9, ElementKind::Way { refs: vec![3, 1] }, Tags::new());
        assert_eq!(way.way_refs(), Some(&[3, 1][..]));
        assert_eq!(tagged(&[]).way_refs(), None);
    }
}
