use thetagrid_core::Position;

use crate::distance::polyline_length;

/// An ordered sequence of waypoints from start to end.
///
/// An empty path means no path exists between the requested endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: Vec<Position>,
    cost: f32,
}

impl Path {
    /// The "no path" outcome.
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn new(waypoints: Vec<Position>, cost: f32) -> Self {
        Self { waypoints, cost }
    }

    /// Whether no path was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Waypoints, start first.
    #[inline]
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Search cost recorded for the start vertex (0 for an empty path).
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Euclidean length of the polyline through the waypoints.
    pub fn length(&self) -> f32 {
        polyline_length(&self.waypoints)
    }

    /// The first waypoint.
    pub fn start(&self) -> Option<Position> {
        self.waypoints.first().copied()
    }

    /// The last waypoint.
    pub fn end(&self) -> Option<Position> {
        self.waypoints.last().copied()
    }

    /// Consecutive `(from, to)` waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.waypoints.windows(2).map(|w| (w[0], w[1]))
    }

    /// Iterate over waypoints.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.waypoints.iter()
    }

    /// Take ownership of the waypoints.
    pub fn into_waypoints(self) -> Vec<Position> {
        self.waypoints
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
