//! City maps for thetagrid: parsing, graph building and line of sight.
//!
//! A [`MapDescription`] is read from the XML city format
//! ([`MapDescription::from_xml`]) or a plain-text equivalent
//! ([`MapDescription::from_text`]). [`GraphBuilder`] turns its open cells
//! into a 4-connected [`Graph`](thetagrid_core::Graph), and [`GridSight`]
//! answers line-of-sight queries against its closed cells.

pub mod builder;
pub mod description;
pub mod error;
pub mod sight;
mod xml;

pub use builder::{CityMap, GraphBuilder, NeighbourScan};
pub use description::{CellKind, MapDescription};
pub use error::{MapFormatError, MapResult};
pub use sight::{GridSight, SightConfig};
