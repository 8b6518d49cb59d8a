//! Turning a [`MapDescription`] into a vertex [`Graph`].

use log::debug;
use thetagrid_core::{Graph, Position};

use crate::description::MapDescription;
use crate::error::MapResult;
use crate::sight::{GridSight, SightConfig};

/// How neighbour links are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighbourScan {
    /// Look each of the four neighbours up in the coordinate index.
    #[default]
    Indexed,
    /// Compare every vertex against every other one. Quadratic; produces
    /// the same links in the same order as `Indexed`.
    Exhaustive,
}

/// Builds the 4-connected graph of a map's open cells.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    map: &'a MapDescription,
    scan: NeighbourScan,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder for `map`.
    pub fn new(map: &'a MapDescription) -> Self {
        Self {
            map,
            scan: NeighbourScan::default(),
        }
    }

    /// Select the neighbour discovery strategy.
    pub fn scan(mut self, scan: NeighbourScan) -> Self {
        self.scan = scan;
        self
    }

    /// Create one vertex per open cell in row-major order, then link each
    /// vertex to its open neighbours (previous row, left, right, next row).
    pub fn build(&self) -> Graph {
        let mut graph = Graph::new();
        for p in self.map.open_cells() {
            graph.add_vertex(p);
        }

        let vertices: Vec<_> = graph.iter().map(|(id, v)| (id, v.point())).collect();
        match self.scan {
            NeighbourScan::Indexed => {
                for &(id, p) in &vertices {
                    for n in p.neighbors_4() {
                        if let Some(nid) = graph.id_at(n) {
                            graph.link(id, nid);
                        }
                    }
                }
            }
            NeighbourScan::Exhaustive => {
                for &(id, p) in &vertices {
                    for &(other, q) in &vertices {
                        if p.is_adjacent_4(q) {
                            graph.link(id, other);
                        }
                    }
                }
            }
        }

        debug!(
            "map: built graph with {} vertices and {} links from {}x{} cells",
            graph.len(),
            graph.edge_count(),
            self.map.width(),
            self.map.height()
        );
        graph
    }
}

impl MapDescription {
    /// Build the vertex graph of this map.
    pub fn build_graph(&self) -> Graph {
        GraphBuilder::new(self).build()
    }
}

/// A map description together with the graph built from it.
#[derive(Debug, Clone)]
pub struct CityMap {
    description: MapDescription,
    graph: Graph,
}

impl CityMap {
    /// Build the graph of `description`.
    pub fn new(description: MapDescription) -> Self {
        let graph = description.build_graph();
        Self { description, graph }
    }

    /// Parse and build a map in the XML city format.
    pub fn from_xml(text: &str) -> MapResult<Self> {
        MapDescription::from_xml(text).map(Self::new)
    }

    /// Parse and build a map in the plain-text format.
    pub fn from_text(text: &str) -> MapResult<Self> {
        MapDescription::from_text(text).map(Self::new)
    }

    /// The source description.
    pub fn description(&self) -> &MapDescription {
        &self.description
    }

    /// The graph of open cells.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Route start.
    pub fn start(&self) -> Position {
        self.description.start()
    }

    /// Route end.
    pub fn end(&self) -> Position {
        self.description.end()
    }

    /// A line-of-sight oracle treating closed cells as obstacles.
    pub fn grid_sight(&self, config: SightConfig) -> GridSight {
        GridSight::from_map(&self.description, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thetagrid_core::Point;
    use thetagrid_paths::{ClearSight, PathFinder};

    const CITY: &str = "\
5 . # 0,0 4,4
.....
.###.
...#.
.#...
.....
";

    #[test]
    fn vertices_for_open_cells_only() {
        let m = MapDescription::from_text(CITY).unwrap();
        let g = m.build_graph();
        assert_eq!(g.len(), 20);
        assert!(g.id_at(Point::new(1, 1)).is_none());
        // Row-major creation order.
        assert_eq!(g.iter().next().map(|(_, v)| v.point()), Some(Point::new(0, 0)));
        assert_eq!(g.iter().last().map(|(_, v)| v.point()), Some(Point::new(4, 4)));
    }

    #[test]
    fn neighbour_order() {
        let g = MapDescription::from_text("3 . # 0,0 0,0\n...\n...\n...\n")
            .unwrap()
            .build_graph();
        let center = g.id_at(Point::new(1, 1)).unwrap();
        let points: Vec<_> = g
            .neighbours(center)
            .iter()
            .map(|&n| g.vertex(n).point())
            .collect();
        assert_eq!(
            points,
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn adjacency_is_symmetric_and_4_connected() {
        let g = MapDescription::from_text(CITY).unwrap().build_graph();
        for (id, v) in g.iter() {
            for &n in v.neighbours() {
                assert!(v.point().is_adjacent_4(g.vertex(n).point()));
                assert!(g.neighbours(n).contains(&id), "{id} -> {n} not mirrored");
            }
        }
        // (0, 0) touches (1, 0) and (0, 1); (4, 2) touches (4, 1) and (4, 3).
        assert_eq!(g.neighbours(g.id_at(Point::new(0, 0)).unwrap()).len(), 2);
        assert_eq!(g.neighbours(g.id_at(Point::new(4, 2)).unwrap()).len(), 2);
    }

    #[test]
    fn exhaustive_scan_matches_indexed() {
        let m = MapDescription::from_text(CITY).unwrap();
        let indexed = GraphBuilder::new(&m).build();
        let exhaustive = GraphBuilder::new(&m).scan(NeighbourScan::Exhaustive).build();
        assert_eq!(indexed.len(), exhaustive.len());
        for ((_, a), (_, b)) in indexed.iter().zip(exhaustive.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unreachable_endpoints_are_not_errors() {
        // Start sits on a closed cell; building still succeeds.
        let map = CityMap::from_text("3 . # 1,1 0,0\n...\n.#.\n...\n").unwrap();
        let mut finder = PathFinder::new();
        let path = finder
            .find_path(map.graph(), map.start(), map.end(), &ClearSight)
            .unwrap();
        assert!(path.is_empty());
    }
}
