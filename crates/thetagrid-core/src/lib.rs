//! **thetagrid-core** — Shared types for any-angle grid pathfinding.
//!
//! This crate provides the foundational types used across the *thetagrid*
//! workspace: integer grid cells and world positions, and the vertex graph
//! built from the walkable cells of a map.

pub mod geom;
pub mod graph;

pub use geom::{ParsePositionError, Point, Position, Range};
pub use graph::{Graph, Vertex, VertexId};
