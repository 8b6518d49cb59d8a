use thetagrid_core::Position;

/// Visibility oracle consulted by the Theta* search.
///
/// Answers whether the straight segment between two world positions is
/// blocked. Any `Fn(Position, Position) -> bool` closure is an oracle.
pub trait LineOfSight {
    /// Whether the segment from `from` to `to` is obstructed.
    fn is_obstructed(&self, from: Position, to: Position) -> bool;

    /// Whether the segment from `from` to `to` is clear.
    fn is_clear(&self, from: Position, to: Position) -> bool {
        !self.is_obstructed(from, to)
    }
}

impl<F> LineOfSight for F
where
    F: Fn(Position, Position) -> bool,
{
    fn is_obstructed(&self, from: Position, to: Position) -> bool {
        self(from, to)
    }
}

/// An oracle for which every segment is clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSight;

impl LineOfSight for ClearSight {
    fn is_obstructed(&self, _from: Position, _to: Position) -> bool {
        false
    }
}
