use rhizome_waypath_curve::PathwayType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pool::Recycle;

/// One curve piece of a [`Path`](crate::Path).
///
/// A segment covers the working points
/// `start_point_index .. start_point_index + arity`, and the slice
/// `[first_point_path_ratio, last_point_path_ratio]` of the whole path's
/// normalized length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    start_point_index: usize,
    length: f32,
    first_point_path_ratio: f32,
    last_point_path_ratio: f32,
    pathway: PathwayType,
}

impl Segment {
    /// Creates a segment descriptor.
    pub fn new(
        start_point_index: usize,
        length: f32,
        first_point_path_ratio: f32,
        last_point_path_ratio: f32,
        pathway: PathwayType,
    ) -> Self {
        Self {
            start_point_index,
            length,
            first_point_path_ratio,
            last_point_path_ratio,
            pathway,
        }
    }

    pub(crate) fn init(
        &mut self,
        start_point_index: usize,
        length: f32,
        first_point_path_ratio: f32,
        last_point_path_ratio: f32,
        pathway: PathwayType,
    ) {
        *self = Self::new(
            start_point_index,
            length,
            first_point_path_ratio,
            last_point_path_ratio,
            pathway,
        );
    }

    /// Index of the first working point in this segment's window.
    pub fn start_point_index(&self) -> usize {
        self.start_point_index
    }

    /// Length of the control polygon this segment traverses.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Path ratio at which this segment begins.
    pub fn first_point_path_ratio(&self) -> f32 {
        self.first_point_path_ratio
    }

    /// Path ratio at which this segment ends.
    pub fn last_point_path_ratio(&self) -> f32 {
        self.last_point_path_ratio
    }

    /// Curve type used to evaluate this segment.
    pub fn pathway(&self) -> PathwayType {
        self.pathway
    }

    /// Whether `ratio` falls inside this segment's closed ratio interval.
    pub fn contains_ratio(&self, ratio: f32) -> bool {
        ratio >= self.first_point_path_ratio && ratio <= self.last_point_path_ratio
    }

    /// Working-point indices of this segment's window, clamped to `point_count`.
    ///
    /// Windows that run past the last point repeat it; only the first
    /// `arity` entries are meaningful.
    pub fn window_indices(&self, point_count: usize) -> [usize; 4] {
        let last = point_count.saturating_sub(1);
        std::array::from_fn(|k| (self.start_point_index + k).min(last))
    }
}

impl Recycle for Segment {
    fn on_dispose(&mut self) {
        *self = Self::default();
    }
}
