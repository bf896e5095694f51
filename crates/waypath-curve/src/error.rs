//! Error types for waypath-curve.

use thiserror::Error;

/// Errors that can occur while evaluating or sampling a curve segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Sampling needs at least one subdivision.
    #[error("subdivision count must be at least 1")]
    ZeroSubdivisions,

    /// The control-point window is shorter than the pathway arity.
    #[error("not enough control points: expected {expected}, got {got}")]
    NotEnoughControlPoints {
        /// Points the pathway type consumes per segment.
        expected: usize,
        /// Points that were supplied.
        got: usize,
    },

    /// An integer code that does not name any pathway type.
    #[error("unknown pathway type code: {0}")]
    UnknownPathwayType(i32),
}
