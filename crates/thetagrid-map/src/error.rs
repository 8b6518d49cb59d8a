use thetagrid_core::ParsePositionError;
use thiserror::Error;

/// Errors that can occur when reading a map description.
#[derive(Debug, Error)]
pub enum MapFormatError {
    /// A required attribute is absent.
    #[error("map: <{element}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute is present but cannot be interpreted.
    #[error("map: invalid `{attribute}` value \u{201c}{value}\u{201d}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    /// A start or end coordinate is not of the form `x,z`.
    #[error("map: invalid `{attribute}`: {source}")]
    InvalidCoordinate {
        attribute: &'static str,
        #[source]
        source: ParsePositionError,
    },

    /// The open and closed markers are the same character.
    #[error("map: open and closed markers are both \u{201c}{0}\u{201d}")]
    InvalidMarker(char),

    /// Rows have inconsistent widths.
    #[error("map: row {row} has width {found}, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row index between 0 and the largest index has no row.
    #[error("map: row {0} is missing")]
    MissingRow(usize),

    /// Two rows share an index.
    #[error("map: row {0} appears more than once")]
    DuplicateRow(usize),

    /// The description contains no rows at all.
    #[error("map: no rows")]
    NoRows,

    /// The plain-text header line is malformed.
    #[error("map: malformed header \u{201c}{0}\u{201d}, expected `size open closed start end`")]
    InvalidHeader(String),

    /// The XML document has no `City` element.
    #[error("map: no <City> element")]
    MissingCity,

    /// The XML document is not well formed.
    #[error("map: {0}")]
    Xml(#[from] roxmltree::Error),
}

pub type MapResult<T> = Result<T, MapFormatError>;
