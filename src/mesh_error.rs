//! MeshNormalizeError: Unified error type for mesh-normalize public APIs
//!
//! Every fallible operation in the crate returns this error. Missing optional
//! geometry or data (no cells, no fields) is never an error; only missing
//! required data and broken provider invariants are.

use thiserror::Error;

/// Unified error type for mesh-normalize operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshNormalizeError {
    /// The provider reported no points; there is nothing to display.
    #[error("No vertices specified, nothing to display")]
    EmptyGeometry,
    /// The grid kind has no path to a points+cells representation.
    #[error("Unsupported grid kind: {0}")]
    UnsupportedGridKind(String),
    /// The reader layer does not understand the given file type.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    /// A cell references a point index outside the point set.
    #[error("cell {cell} references point {index}, but the grid has {point_count} points")]
    CellIndexOutOfRange {
        cell: usize,
        index: usize,
        point_count: usize,
    },
    /// A cell's point list does not match the arity of its kind.
    #[error("cell {cell} of kind {kind} expected {expected} point ids, found {found}")]
    InvalidCell {
        cell: usize,
        kind: String,
        expected: usize,
        found: usize,
    },
    /// A 3-D cell kind the volume decomposer cannot reduce to tetrahedra.
    #[error("cell {cell} has unsupported volumetric kind {kind}")]
    UnsupportedCell { cell: usize, kind: String },
    /// Field tuple count does not match the point count it is attached to.
    #[error("field `{field}` has {found} tuples, expected {expected}")]
    FieldLengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    /// A field array whose shape is malformed (e.g. zero components).
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    /// A point index does not fit the 32-bit index contract.
    #[error("point index {0} does not fit in an unsigned 32-bit index")]
    IndexOverflow(usize),
    /// An in-memory grid was assembled with inconsistent shape data.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// Malformed input while parsing a grid file.
    #[error("Mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Underlying I/O failure (stringified so the error stays `Clone`).
    #[error("I/O error: {0}")]
    Io(String),
    /// A byte buffer does not follow the wire layout.
    #[error("wire format error: {0}")]
    WireFormat(String),
    /// Configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for MeshNormalizeError {
    fn from(err: std::io::Error) -> Self {
        MeshNormalizeError::Io(err.to_string())
    }
}
