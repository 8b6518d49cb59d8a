use thetagrid_core::Position;

/// Euclidean distance between two world positions.
#[inline]
pub fn euclidean(a: Position, b: Position) -> f32 {
    a.distance(b)
}

/// Total Euclidean length of a polyline.
pub fn polyline_length(points: &[Position]) -> f32 {
    points.windows(2).map(|w| euclidean(w[0], w[1])).sum()
}
