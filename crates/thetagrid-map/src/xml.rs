//! Reader for the XML city format.
//!
//! ```xml
//! <City Size="5" Open="." Closed="#" Start="0,0" End="4,4">
//!   <Line Id="0">.....</Line>
//!   <Line Id="1">.###.</Line>
//!   ...
//! </City>
//! ```
//!
//! Each `Line`'s `Id` is its row index; rows may appear in any order.

use std::collections::BTreeMap;

use log::debug;
use roxmltree::{Document, Node};

use crate::description::{MapDescription, parse_coordinate, parse_index, parse_marker, parse_size};
use crate::error::{MapFormatError, MapResult};

const CITY: &str = "City";
const LINE: &str = "Line";

impl MapDescription {
    /// Parse a description from the XML city format.
    pub fn from_xml(text: &str) -> MapResult<Self> {
        let doc = Document::parse(text)?;
        let city = doc
            .descendants()
            .find(|n| n.has_tag_name(CITY))
            .ok_or(MapFormatError::MissingCity)?;

        let size = parse_size(required(city, CITY, "Size")?)?;
        let open = parse_marker("Open", required(city, CITY, "Open")?)?;
        let closed = parse_marker("Closed", required(city, CITY, "Closed")?)?;
        let start = parse_coordinate("Start", required(city, CITY, "Start")?)?;
        let end = parse_coordinate("End", required(city, CITY, "End")?)?;

        let mut lines = BTreeMap::new();
        for line in doc.descendants().filter(|n| n.has_tag_name(LINE)) {
            let id = parse_index("Id", required(line, LINE, "Id")?)? as usize;
            let text = line.text().unwrap_or_default().to_string();
            if lines.insert(id, text).is_some() {
                return Err(MapFormatError::DuplicateRow(id));
            }
        }

        // Ids must be exactly 0..n; the first one out of place is missing.
        let mut rows = Vec::with_capacity(lines.len());
        for (expected, (id, text)) in lines.into_iter().enumerate() {
            if id != expected {
                return Err(MapFormatError::MissingRow(expected));
            }
            rows.push(text);
        }
        debug!("map: read {} rows from XML", rows.len());

        Self::new(size, open, closed, start, end, rows)
    }
}

fn required<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> MapResult<&'a str> {
    node.attribute(attribute)
        .ok_or(MapFormatError::MissingAttribute { element, attribute })
}
