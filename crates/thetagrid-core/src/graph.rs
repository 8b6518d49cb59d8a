//! The walkable-cell graph.
//!
//! A [`Graph`] owns one [`Vertex`] per open cell. Vertices refer to each
//! other only through [`VertexId`]s (indices into the graph's dense store),
//! so neighbour lists and search parent links never carry ownership.

use std::collections::HashMap;
use std::fmt;

use crate::geom::{Point, Position};

/// Identity of a vertex within its [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

impl VertexId {
    /// The index into the graph's vertex store.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A walkable cell and its 4-connected walkable neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    point: Point,
    neighbours: Vec<VertexId>,
}

impl Vertex {
    fn new(point: Point) -> Self {
        Self {
            point,
            neighbours: Vec::with_capacity(4),
        }
    }

    /// Grid coordinate.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// World-space coordinate (y = 0).
    #[inline]
    pub fn position(&self) -> Position {
        self.point.to_position()
    }

    /// Adjacent walkable vertices.
    #[inline]
    pub fn neighbours(&self) -> &[VertexId] {
        &self.neighbours
    }
}

/// Dense store of vertices with a coordinate index.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: HashMap<Point, VertexId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex at `point`, or return the existing one.
    pub fn add_vertex(&mut self, point: Point) -> VertexId {
        if let Some(&id) = self.index.get(&point) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(point));
        self.index.insert(point, id);
        id
    }

    /// Record `to` as a neighbour of `from`. Links are directed; linking the
    /// same pair twice has no effect.
    ///
    /// # Panics
    ///
    /// Panics if either id does not belong to this graph.
    pub fn link(&mut self, from: VertexId, to: VertexId) {
        assert!(to.0 < self.vertices.len(), "vertex {to} out of bounds");
        let v = &mut self.vertices[from.0];
        if !v.neighbours.contains(&to) {
            v.neighbours.push(to);
        }
    }

    /// The vertex with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Neighbours of `id`.
    #[inline]
    pub fn neighbours(&self, id: VertexId) -> &[VertexId] {
        self.vertices[id.0].neighbours()
    }

    /// World-space coordinate of `id`.
    #[inline]
    pub fn position(&self, id: VertexId) -> Position {
        self.vertices[id.0].position()
    }

    /// The vertex at a grid coordinate.
    #[inline]
    pub fn id_at(&self, point: Point) -> Option<VertexId> {
        self.index.get(&point).copied()
    }

    /// The vertex whose coordinate equals a world position.
    pub fn find(&self, pos: Position) -> Option<VertexId> {
        self.id_at(pos.to_point()?)
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over `(id, vertex)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    /// Total number of directed neighbour links.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.neighbours.len()).sum()
    }
}
