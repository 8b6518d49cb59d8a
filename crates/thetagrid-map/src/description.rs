//! The textual map description a graph is built from.
//!
//! A [`MapDescription`] is a rectangle of marker characters plus the
//! general data of a city map: its nominal size, which character marks an
//! open (walkable) cell and which a closed one, and the start and end
//! coordinates of the route to find. Row `z` of the text is the Z axis,
//! column `x` the X axis.

use std::fmt;

use thetagrid_core::{Point, Position, Range};

use crate::error::{MapFormatError, MapResult};

/// Classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Walkable; becomes a graph vertex.
    Open,
    /// Not walkable; an obstacle.
    Closed,
    /// Neither marker. Not walkable, and not an obstacle either.
    Other(char),
}

/// A validated grid description.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDescription {
    size: i32,
    open: char,
    closed: char,
    start: Position,
    end: Position,
    rows: Vec<String>,
    cells: Vec<char>,
    width: usize,
}

impl MapDescription {
    /// Create a description, checking that the markers differ and that
    /// every row has the same width.
    pub fn new(
        size: i32,
        open: char,
        closed: char,
        start: Position,
        end: Position,
        rows: Vec<String>,
    ) -> MapResult<Self> {
        if open == closed {
            return Err(MapFormatError::InvalidMarker(open));
        }
        let Some(first) = rows.first() else {
            return Err(MapFormatError::NoRows);
        };
        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.chars());
            let found = cells.len() - before;
            if found != width {
                return Err(MapFormatError::NonRectangular {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        Ok(Self {
            size,
            open,
            closed,
            start,
            end,
            rows,
            cells,
            width,
        })
    }

    /// Parse the plain-text format: a header line
    /// `size open closed start end` (for example `5 . # 0,0 4,4`) followed
    /// by one line per row. Trailing blank lines are ignored.
    pub fn from_text(s: &str) -> MapResult<Self> {
        let mut lines = s.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));
        let header = lines.next().ok_or(MapFormatError::NoRows)?;

        let fields: Vec<&str> = header.split_whitespace().collect();
        let [size, open, closed, start, end] = fields.as_slice() else {
            return Err(MapFormatError::InvalidHeader(header.to_string()));
        };

        let mut rows: Vec<String> = lines.map(str::to_string).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        Self::new(
            parse_size(size)?,
            parse_marker("Open", open)?,
            parse_marker("Closed", closed)?,
            parse_coordinate("Start", start)?,
            parse_coordinate("End", end)?,
            rows,
        )
    }

    /// Nominal map size as declared by the description.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Marker of an open cell.
    pub fn open(&self) -> char {
        self.open
    }

    /// Marker of a closed cell.
    pub fn closed(&self) -> char {
        self.closed
    }

    /// Route start.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Route end.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Raw rows, row 0 first.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.bounds().width() as usize
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.bounds().depth() as usize
    }

    /// The rectangle of cells covered by the rows.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.rows.len() as i32)
    }

    /// Classify the cell at `p`, or `None` if it is outside the rows.
    pub fn cell(&self, p: Point) -> Option<CellKind> {
        if !self.bounds().contains(p) {
            return None;
        }
        let ch = self.cells[p.z as usize * self.width + p.x as usize];
        Some(self.classify(ch))
    }

    /// Open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells_of(CellKind::Open)
    }

    /// Closed cells in row-major order.
    pub fn closed_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells_of(CellKind::Closed)
    }

    fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = Point> + '_ {
        self.bounds()
            .iter()
            .zip(self.cells.iter())
            .filter(move |&(_, &ch)| self.classify(ch) == kind)
            .map(|(p, _)| p)
    }

    fn classify(&self, ch: char) -> CellKind {
        if ch == self.open {
            CellKind::Open
        } else if ch == self.closed {
            CellKind::Closed
        } else {
            CellKind::Other(ch)
        }
    }
}

impl fmt::Display for MapDescription {
    /// Writes the plain-text format accepted by [`MapDescription::from_text`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} {} {},{} {},{}",
            self.size, self.open, self.closed, self.start.x, self.start.z, self.end.x, self.end.z
        )?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Parse a numeric attribute the way the city format writes them: any
/// decimal number, truncated toward zero.
pub(crate) fn parse_index(attribute: &'static str, s: &str) -> MapResult<i64> {
    let invalid = || MapFormatError::InvalidAttribute {
        attribute,
        value: s.to_string(),
    };
    let v: f64 = s.trim().parse().map_err(|_| invalid())?;
    if !v.is_finite() || v < 0.0 || v > i32::MAX as f64 {
        return Err(invalid());
    }
    Ok(v.trunc() as i64)
}

pub(crate) fn parse_size(s: &str) -> MapResult<i32> {
    parse_index("Size", s).map(|v| v as i32)
}

pub(crate) fn parse_marker(attribute: &'static str, s: &str) -> MapResult<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(MapFormatError::InvalidAttribute {
            attribute,
            value: s.to_string(),
        }),
    }
}

pub(crate) fn parse_coordinate(attribute: &'static str, s: &str) -> MapResult<Position> {
    s.parse()
        .map_err(|source| MapFormatError::InvalidCoordinate { attribute, source })
}
