//! Error types for waypath-tween.

use rhizome_waypath_path::PathError;
use thiserror::Error;

use crate::tweener::TweenId;

/// Errors that can occur while creating, ticking or registering tweeners.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenError {
    /// The target was already dropped when the tween was created.
    #[error("tween target is gone")]
    DeadTarget,

    /// A tween needs at least one control point to move along.
    #[error("cannot tween along an empty path")]
    EmptyPath,

    /// Duration must be finite and non-negative.
    #[error("invalid tween duration: {0}")]
    InvalidDuration(f32),

    /// The target was mutably borrowed elsewhere during a tick.
    #[error("tween target is already borrowed")]
    TargetBusy,

    /// A tweener with this id is already registered.
    #[error("{0} is already registered")]
    DuplicateId(TweenId),

    /// No registered tweener has this id.
    #[error("{0} is not registered")]
    NotFound(TweenId),

    /// Error from the underlying path.
    #[error("path error: {0}")]
    Path(#[from] PathError),
}
