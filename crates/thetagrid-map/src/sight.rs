//! Line of sight over a grid of blocked cells.
//!
//! Each blocked cell is a cube of half-extent [`SightConfig::half_extent`]
//! centred on the cell (a unit cube by default). A segment is obstructed
//! when it intersects any cube; touching a face, edge or corner counts.

use std::collections::HashSet;

use thetagrid_core::{Point, Position};
use thetagrid_paths::LineOfSight;

use crate::description::MapDescription;

/// Geometry of the obstacles tested by [`GridSight`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SightConfig {
    /// Half the side length of a blocked cell's cube.
    pub half_extent: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self { half_extent: 0.5 }
    }
}

impl SightConfig {
    /// Builder-style setter for [`half_extent`](Self::half_extent).
    pub fn with_half_extent(mut self, half_extent: f32) -> Self {
        self.half_extent = half_extent;
        self
    }
}

/// Visibility oracle over a set of blocked grid cells.
#[derive(Debug, Clone)]
pub struct GridSight {
    blocked: HashSet<Point>,
    half_extent: f32,
}

impl GridSight {
    /// An oracle where each of `blocked` is an obstacle.
    pub fn new(blocked: impl IntoIterator<Item = Point>, config: SightConfig) -> Self {
        Self {
            blocked: blocked.into_iter().collect(),
            half_extent: config.half_extent,
        }
    }

    /// An oracle where the map's closed cells are the obstacles. Cells
    /// marked with neither the open nor the closed marker do not block.
    pub fn from_map(map: &MapDescription, config: SightConfig) -> Self {
        Self::new(map.closed_cells(), config)
    }

    /// Whether `p` is an obstacle.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.blocked.contains(&p)
    }

    /// Number of obstacles.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether there are no obstacles.
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    fn hits(&self, a: Position, b: Position, cell: Point) -> bool {
        let h = self.half_extent;
        let c = [cell.x as f32, 0.0, cell.z as f32];
        segment_hits_box(a, b, c.map(|v| v - h), c.map(|v| v + h))
    }
}

impl LineOfSight for GridSight {
    fn is_obstructed(&self, from: Position, to: Position) -> bool {
        let h = self.half_extent;
        let min_x = (from.x.min(to.x) - h).floor() as i32;
        let max_x = (from.x.max(to.x) + h).ceil() as i32;
        let min_z = (from.z.min(to.z) - h).floor() as i32;
        let max_z = (from.z.max(to.z) + h).ceil() as i32;
        let area = (max_x - min_x + 1) as usize * (max_z - min_z + 1) as usize;

        // Scan whichever is smaller: the segment's bounding box or the
        // obstacle set.
        if area <= self.blocked.len() {
            (min_z..=max_z)
                .flat_map(|z| (min_x..=max_x).map(move |x| Point::new(x, z)))
                .any(|p| self.blocked.contains(&p) && self.hits(from, to, p))
        } else {
            self.blocked.iter().any(|&p| {
                p.x >= min_x
                    && p.x <= max_x
                    && p.z >= min_z
                    && p.z <= max_z
                    && self.hits(from, to, p)
            })
        }
    }
}

/// Slab test of the segment `a`-`b` against the closed box `[min, max]`.
fn segment_hits_box(a: Position, b: Position, min: [f32; 3], max: [f32; 3]) -> bool {
    let origin = [a.x, a.y, a.z];
    let dir = [b.x - a.x, b.y - a.y, b.z - a.z];
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for axis in 0..3 {
        if dir[axis] == 0.0 {
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return false;
            }
            continue;
        }
        let inv = 1.0 / dir[axis];
        let mut near = (min[axis] - origin[axis]) * inv;
        let mut far = (max[axis] - origin[axis]) * inv;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        t0 = t0.max(near);
        t1 = t1.min(far);
        if t0 > t1 {
            return false;
        }
    }
    true
}
