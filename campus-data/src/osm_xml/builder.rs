//! Internal state machine that assembles raw elements from XML events.
//!
//! Depth 0 is outside the document, depth 1 is directly inside `<osm>` and
//! depth 2 is inside a node, way or relation.

use campus_core::{ElementKind, RawElement, Tags};
use quick_xml::events::BytesStart;

use super::{OsmLoadReport, OsmLoadSummary, OsmXmlError};

const ROOT: &[u8] = b"osm";
const ELEMENT_DEPTH: usize = 1;
const CHILD_DEPTH: usize = 2;

#[derive(Debug)]
struct PendingElement {
    id: i64,
    kind: ElementKind,
    tags: Tags,
}

impl PendingElement {
    fn into_raw(self) -> RawElement {
        RawElement::new(self.id, self.kind, self.tags)
    }
}

#[derive(Debug, Default)]
pub(super) struct ElementBuilder {
    seen_root: bool,
    depth: usize,
    current: Option<PendingElement>,
    summary: OsmLoadSummary,
    elements: Vec<RawElement>,
}

impl ElementBuilder {
    /// Handle a start tag, or an empty element when `self_closing` is set.
    pub(super) fn open(
        &mut self,
        start: &BytesStart<'_>,
        position: usize,
        self_closing: bool,
    ) -> Result<(), OsmXmlError> {
        let name = start.name();
        if !self.seen_root {
            if name.as_ref() != ROOT {
                return Err(OsmXmlError::UnexpectedRoot {
                    found: String::from_utf8_lossy(name.as_ref()).into_owned(),
                });
            }
            self.seen_root = true;
        } else if self.depth == ELEMENT_DEPTH {
            self.current = self.begin_element(start, position)?;
            if self_closing {
                self.finish_element();
            }
        } else if self.depth == CHILD_DEPTH {
            self.add_child(start, position)?;
        }
        if !self_closing {
            self.depth += 1;
        }
        Ok(())
    }

    /// Handle an end tag.
    pub(super) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == ELEMENT_DEPTH {
            self.finish_element();
        }
    }

    pub(super) fn finish(self) -> Result<OsmLoadReport, OsmXmlError> {
        if !self.seen_root {
            return Err(OsmXmlError::MissingRoot);
        }
        if self.depth > 0 {
            return Err(OsmXmlError::Truncated);
        }
        Ok(OsmLoadReport {
            summary: self.summary,
            elements: self.elements,
        })
    }

    fn begin_element(
        &mut self,
        start: &BytesStart<'_>,
        position: usize,
    ) -> Result<Option<PendingElement>, OsmXmlError> {
        let pending = match start.name().as_ref() {
            b"node" => {
                let id = required_id(start, "node", "id", position)?;
                let lat = coordinate(start, id, "lat", position)?;
                let lon = coordinate(start, id, "lon", position)?;
                self.summary.record_node(lat, lon);
                PendingElement {
                    id,
                    kind: ElementKind::Node { lat, lon },
                    tags: Tags::new(),
                }
            }
            b"way" => {
                let id = required_id(start, "way", "id", position)?;
                self.summary.record_way();
                PendingElement {
                    id,
                    kind: ElementKind::Way { refs: Vec::new() },
                    tags: Tags::new(),
                }
            }
            b"relation" => {
                let id = required_id(start, "relation", "id", position)?;
                self.summary.record_relation();
                PendingElement {
                    id,
                    kind: ElementKind::Other {
                        name: "relation".to_owned(),
                    },
                    tags: Tags::new(),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(pending))
    }

    fn add_child(&mut self, start: &BytesStart<'_>, position: usize) -> Result<(), OsmXmlError> {
        let Some(pending) = self.current.as_mut() else {
            return Ok(());
        };
        match start.name().as_ref() {
            b"tag" => {
                let key = required_attr(start, "tag", "k", position)?;
                let value = attr(start, b"v", position)?.unwrap_or_default();
                pending.tags.insert(key, value);
            }
            b"nd" => {
                if let ElementKind::Way { refs } = &mut pending.kind {
                    refs.push(required_id(start, "nd", "ref", position)?);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish_element(&mut self) {
        if let Some(pending) = self.current.take() {
            self.elements.push(pending.into_raw());
        }
    }
}

fn attr(start: &BytesStart<'_>, key: &[u8], position: usize) -> Result<Option<String>, OsmXmlError> {
    for entry in start.attributes().with_checks(false) {
        let attribute = entry.map_err(|source| OsmXmlError::Xml {
            source: source.into(),
            position,
        })?;
        if attribute.key.as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|source| OsmXmlError::Xml { source, position })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(
    start: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
    position: usize,
) -> Result<String, OsmXmlError> {
    attr(start, attribute.as_bytes(), position)?.ok_or(OsmXmlError::MissingAttribute {
        element,
        attribute,
        position,
    })
}

fn required_id(
    start: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
    position: usize,
) -> Result<i64, OsmXmlError> {
    let value = required_attr(start, element, attribute, position)?;
    value
        .trim()
        .parse()
        .map_err(|source| OsmXmlError::InvalidId {
            element,
            attribute,
            value: value.clone(),
            position,
            source,
        })
}

fn coordinate(
    start: &BytesStart<'_>,
    id: i64,
    attribute: &'static str,
    position: usize,
) -> Result<f64, OsmXmlError> {
    let value = required_attr(start, "node", attribute, position)?;
    value
        .trim()
        .parse()
        .map_err(|source| OsmXmlError::InvalidCoordinate {
            id,
            attribute,
            value: value.clone(),
            source,
        })
}
