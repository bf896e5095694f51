//! Error types for waypath-path.

use rhizome_waypath_curve::CurveError;
use thiserror::Error;

/// Errors that can occur while editing or querying a [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A point index outside the valid range for the operation.
    #[error("point index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of points at the time of the request.
        len: usize,
    },

    /// A segment index outside `0..segment_count`.
    #[error("segment index {index} out of range (count {count})")]
    SegmentIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of segments.
        count: usize,
    },

    /// A position query on a path with no points.
    #[error("path has no points")]
    EmptyPath,

    /// No segment covers a ratio in `[0, 1]`. Indicates a segmentation bug.
    #[error("no segment contains path ratio {ratio}")]
    SegmentNotFound {
        /// The clamped ratio that was looked up.
        ratio: f32,
    },

    /// Sample arrays need at least one subdivision per segment.
    #[error("subdivision count must be at least 1")]
    ZeroSubdivisions,

    /// Error from the curve evaluators.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),
}

/// Errors that can occur while reading or writing export records.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A row did not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields the format requires.
        expected: usize,
        /// Fields present in the row.
        found: usize,
    },

    /// A field that should be numeric did not parse.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A point-kind code with no matching kind.
    #[error("unknown point kind code: {0}")]
    UnknownKind(i32),

    /// A row failed to parse.
    #[error("line {line}: {source}")]
    Line {
        /// One-based line number.
        line: usize,
        /// What went wrong on that line.
        source: Box<ExportError>,
    },
}
