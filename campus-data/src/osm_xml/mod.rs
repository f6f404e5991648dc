//! Streaming reader for OpenStreetMap (OSM) XML exports.
//!
//! The reader walks the document once with `quick-xml`, turning every direct
//! `<node>`, `<way>` and `<relation>` child of the `<osm>` root into a
//! [`RawElement`]. Other children such as `<bounds>` are skipped.

use std::io::BufRead;
use std::num::{ParseFloatError, ParseIntError};

use campus_core::RawElement;
use geo::{Coord, Rect};
use log::debug;
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

mod builder;

use builder::ElementBuilder;

/// Counts of raw OSM elements seen while reading a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmLoadSummary {
    /// Number of `<node>` elements read.
    pub nodes: u64,
    /// Number of `<way>` elements read.
    pub ways: u64,
    /// Number of `<relation>` elements read.
    pub relations: u64,
    /// Bounding box covering all valid node coordinates, if any.
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    pub bounds: Option<Rect<f64>>,
}

impl OsmLoadSummary {
    fn include_bounds(&mut self, bounds: Rect<f64>) {
        match &mut self.bounds {
            Some(existing) => {
                let min = Coord {
                    x: existing.min().x.min(bounds.min().x),
                    y: existing.min().y.min(bounds.min().y),
                };
                let max = Coord {
                    x: existing.max().x.max(bounds.max().x),
                    y: existing.max().y.max(bounds.max().y),
                };
                *existing = Rect::new(min, max);
            }
            None => self.bounds = Some(bounds),
        }
    }

    fn record_node(&mut self, lat: f64, lon: f64) {
        self.nodes += 1;
        if let Some(bounds) = Self::coordinate_bounds(lat, lon) {
            self.include_bounds(bounds);
        }
    }

    const fn record_way(&mut self) {
        self.ways += 1;
    }

    const fn record_relation(&mut self) {
        self.relations += 1;
    }

    fn coordinate_bounds(lat: f64, lon: f64) -> Option<Rect<f64>> {
        (lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat))
        .then(|| {
            let coordinate = Coord { x: lon, y: lat };
            Rect::new(coordinate, coordinate)
        })
    }
}

/// Everything read from an OSM XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmLoadReport {
    /// Element counts and bounding box.
    pub summary: OsmLoadSummary,
    /// Elements in document order.
    pub elements: Vec<RawElement>,
}

/// Errors returned when a document is not a well-formed OSM XML export.
///
/// Byte positions refer to the reader's offset into the input when the
/// problem was detected.
#[derive(Debug, Error)]
pub enum OsmXmlError {
    /// The XML itself could not be parsed.
    #[error("malformed XML near byte {position}")]
    Xml {
        /// Parser failure.
        #[source]
        source: quick_xml::Error,
        /// Byte offset of the failure.
        position: usize,
    },
    /// The document element is not `<osm>`.
    #[error("expected an <osm> root element but found <{found}>")]
    UnexpectedRoot {
        /// Name of the element found instead.
        found: String,
    },
    /// The input contained no elements at all.
    #[error("document contains no <osm> root element")]
    MissingRoot,
    /// The input ended before the root element was closed.
    #[error("document ended before the <osm> element was closed")]
    Truncated,
    /// A required attribute was absent.
    #[error("<{element}> near byte {position} is missing the `{attribute}` attribute")]
    MissingAttribute {
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// Byte offset of the element.
        position: usize,
    },
    /// An identifier or node reference was not a 64-bit integer.
    #[error("invalid `{attribute}` value {value:?} on <{element}> near byte {position}")]
    InvalidId {
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
        /// Raw attribute value.
        value: String,
        /// Byte offset of the element.
        position: usize,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// A latitude or longitude was not a number.
    #[error("invalid `{attribute}` value {value:?} on node {id}")]
    InvalidCoordinate {
        /// Node identifier.
        id: i64,
        /// Attribute name.
        attribute: &'static str,
        /// Raw attribute value.
        value: String,
        /// Float parse failure.
        #[source]
        source: ParseFloatError,
    },
}

/// Read an OSM XML document into raw elements and a summary.
///
/// Tags with an empty value are kept; [`RawElement::tag`] treats them as
/// absent.
///
/// # Errors
/// Returns [`OsmXmlError`] when the XML is malformed, the root element is not
/// `<osm>`, or a node, way or node reference lacks a required attribute.
///
/// # Examples
/// ```
/// use campus_core::ElementKind;
/// use campus_data::read_osm_xml;
///
/// # fn main() -> Result<(), campus_data::OsmXmlError> {
/// let xml = r#"<osm version="0.6">
///   <node id="1" lat="42.05" lon="-87.67"><tag k="entrance" v="main"/></node>
///   <way id="2"><nd ref="1"/><tag k="building" v="university"/></way>
/// </osm>"#;
/// let report = read_osm_xml(xml.as_bytes())?;
/// assert_eq!((report.summary.nodes, report.summary.ways), (1, 1));
/// assert!(matches!(report.elements[1].kind, ElementKind::Way { ref refs } if refs == &[1]));
/// # Ok(())
/// # }
/// ```
pub fn read_osm_xml<R: BufRead>(input: R) -> Result<OsmLoadReport, OsmXmlError> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut builder = ElementBuilder::default();
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf);
        match event.map_err(|source| OsmXmlError::Xml {
            source,
            position: reader.buffer_position(),
        })? {
            Event::Start(start) => builder.open(&start, reader.buffer_position(), false)?,
            Event::Empty(start) => builder.open(&start, reader.buffer_position(), true)?,
            Event::End(_) => builder.close(),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let report = builder.finish()?;
    debug!(
        "Read {} nodes, {} ways and {} relations",
        report.summary.nodes, report.summary.ways, report.summary.relations
    );
    Ok(report)
}
