//! Geometry primitives: [`Point`], [`Position`] and [`Range`].
//!
//! A map is a 2D grid laid on the XZ plane of a 3D world. Grid cells are
//! addressed by integer [`Point`]s; waypoints and line-of-sight queries use
//! world-space [`Position`]s with `y` fixed at 0.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// An integer grid cell. X is the column, Z is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub z: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Return a point shifted by (dx, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four cardinal neighbours, in row-major order
    /// (previous row, left, right, next row).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(0, -1),
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one unit away along exactly one axis.
    #[inline]
    pub fn is_adjacent_4(self, other: Point) -> bool {
        (self.x - other.x).abs() + (self.z - other.z).abs() == 1
    }

    /// The world-space centre of this cell (y = 0).
    #[inline]
    pub fn to_position(self) -> Position {
        Position::flat(self.x as f32, self.z as f32)
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.z.hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z.cmp(&other.z).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        p.to_position()
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in 3D world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// World origin.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new position.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A position on the ground plane (y = 0).
    #[inline]
    pub const fn flat(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    #[inline]
    pub fn lerp(self, other: Position, t: f32) -> Position {
        Position::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// The grid cell this position sits on, if it lies exactly on a cell
    /// centre of the ground plane.
    pub fn to_point(self) -> Option<Point> {
        if self.y != 0.0 || self.x.fract() != 0.0 || self.z.fract() != 0.0 {
            return None;
        }
        let in_i32 = |v: f32| v >= i32::MIN as f32 && v <= i32::MAX as f32;
        if !in_i32(self.x) || !in_i32(self.z) {
            return None;
        }
        Some(Point::new(self.x as i32, self.z as i32))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Error returned when a `"x,z"` coordinate string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate \u{201c}{0}\u{201d}: expected two comma-separated numbers")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse a ground-plane position from `"x,z"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let mut parts = s.split(',');
        let (Some(x), Some(z), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let x: f32 = x.trim().parse().map_err(|_| err())?;
        let z: f32 = z.trim().parse().map_err(|_| err())?;
        if !x.is_finite() || !z.is_finite() {
            return Err(err());
        }
        Ok(Position::flat(x, z))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle of cells \[min, max).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, z0: i32, x1: i32, z1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), z0.min(z1)),
            max: Point::new(x0.max(x1), z0.max(z1)),
        }
    }

    /// Width of the range (number of columns).
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Depth of the range (number of rows).
    #[inline]
    pub fn depth(self) -> i32 {
        self.max.z - self.min.z
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.depth() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.z >= self.max.z
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.z >= self.min.z && p.z < self.max.z
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.z >= self.range.max.z || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.z += 1;
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_4_row_major_order() {
        let n = Point::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(2, 3),
            ]
        );
        for p in n {
            assert!(Point::new(2, 2).is_adjacent_4(p));
        }
        assert!(!Point::new(2, 2).is_adjacent_4(Point::new(3, 3)));
        assert!(!Point::new(2, 2).is_adjacent_4(Point::new(2, 2)));
    }

    #[test]
    fn position_distance() {
        let a = Position::flat(0.0, 0.0);
        let b = Position::flat(4.0, 4.0);
        assert!((a.distance(b) - 32f32.sqrt()).abs() < 1e-6);
        assert_eq!(a.distance_squared(b), 32.0);
        assert_eq!(a.lerp(b, 0.5), Position::flat(2.0, 2.0));
    }

    #[test]
    fn position_to_point() {
        assert_eq!(Position::flat(3.0, 5.0).to_point(), Some(Point::new(3, 5)));
        assert_eq!(Position::flat(3.5, 5.0).to_point(), None);
        assert_eq!(Position::new(3.0, 1.0, 5.0).to_point(), None);
        assert_eq!(Point::new(-2, 7).to_position().to_point(), Some(Point::new(-2, 7)));
    }

    #[test]
    fn parse_position() {
        assert_eq!("3,5".parse::<Position>(), Ok(Position::flat(3.0, 5.0)));
        assert_eq!(" 1.5 , 2 ".parse::<Position>(), Ok(Position::flat(1.5, 2.0)));
        assert!("3".parse::<Position>().is_err());
        assert!("3,4,5".parse::<Position>().is_err());
        assert!("a,b".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
        assert!("inf,0".parse::<Position>().is_err());
    }

    #[test]
    fn range_basics() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Point::new(0, 0));
        assert_eq!(r.width(), 3);
        assert_eq!(r.depth(), 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 1)));
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        assert_eq!(Range::new(0, 0, 0, 4).iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn position_round_trip() {
        let p = Position::flat(3.0, 7.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
