//! Any-angle pathfinding for grid maps.
//!
//! This crate implements the Theta* search over a [`Graph`] of walkable
//! cells, together with the pieces it is built from:
//!
//! - **[`PathFinder`]** runs the search backward from the goal and returns
//!   an ordered [`Path`] of waypoints from start to end.
//! - **[`PriorityQueue`]** is the open list: a binary min-heap with
//!   identity-based `contains` and `remove`.
//! - **[`LineOfSight`]** is the visibility oracle consulted when a vertex
//!   may skip over its parent. Closures implement it.
//!
//! Not finding a path is a normal outcome and yields an empty [`Path`].
//!
//! ```
//! use thetagrid_core::{Graph, Point, Position};
//! use thetagrid_paths::{ClearSight, PathFinder};
//!
//! // A 3x3 block of open cells, linked 4-ways.
//! let mut graph = Graph::new();
//! for z in 0..3 {
//!     for x in 0..3 {
//!         graph.add_vertex(Point::new(x, z));
//!     }
//! }
//! let cells: Vec<_> = graph.iter().map(|(id, v)| (id, v.point())).collect();
//! for (id, p) in cells {
//!     for n in p.neighbors_4() {
//!         if let Some(nid) = graph.id_at(n) {
//!             graph.link(id, nid);
//!         }
//!     }
//! }
//!
//! let start = Position::flat(0.0, 0.0);
//! let end = Position::flat(2.0, 2.0);
//! let mut finder = PathFinder::new();
//! let path = finder.find_path(&graph, start, end, &ClearSight)?;
//! assert_eq!(path.waypoints(), &[start, end]);
//! # Ok::<(), thetagrid_paths::SearchError>(())
//! ```
//!
//! [`Graph`]: thetagrid_core::Graph

mod config;
mod distance;
mod error;
mod path;
mod queue;
mod sight;
mod theta;

pub use config::SearchConfig;
pub use distance::{euclidean, polyline_length};
pub use error::{SearchError, SearchResult};
pub use path::Path;
pub use queue::{EmptyQueueError, PriorityQueue};
pub use sight::{ClearSight, LineOfSight};
pub use theta::{PathFinder, SearchStats};
