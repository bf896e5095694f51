use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::Vec3;
use rhizome_waypath_curve::{PathwayType, polyline_length};
use rhizome_waypath_easing::Ease;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::pool::{Pool, Recycle};
use crate::segment::Segment;
use crate::source::{PositionSource, collect_positions};

/// Shape and sampling settings of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PathConfig {
    /// How control points are joined into segments.
    pub pathway: PathwayType,
    /// Remaps query ratios before they are turned into distances.
    pub ease: Ease,
    /// Samples per segment in subdivided point arrays. At least 1.
    pub subdivisions: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            pathway: PathwayType::Line,
            ease: Ease::Linear,
            subdivisions: 10,
        }
    }
}

impl PathConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set pathway type.
    pub fn with_pathway(mut self, pathway: PathwayType) -> Self {
        self.pathway = pathway;
        self
    }

    /// Builder: set easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Builder: set subdivisions per segment.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    fn validate(&self) -> Result<(), PathError> {
        if self.subdivisions == 0 {
            return Err(PathError::ZeroSubdivisions);
        }
        Ok(())
    }
}

/// Number of working points a pathway derives from `control_point_count` points.
///
/// Catmull-Rom pads one synthetic point at each end once there are at least
/// two points to extrapolate from.
pub fn working_point_count(pathway: PathwayType, control_point_count: usize) -> usize {
    match pathway {
        PathwayType::CatmullRomSpline if control_point_count >= 2 => control_point_count + 2,
        _ => control_point_count,
    }
}

/// Closed-form segment count for `control_point_count` points.
///
/// Zero points give no segments and one point a single degenerate segment.
/// Otherwise, with `w` working points, arity `a` and step `s`, the count is
/// `ceil((w - a + 1) / s)`, plus one trailing partial segment for Bezier
/// types when `(w - 1) % s != 0`.
pub fn expected_segment_count(pathway: PathwayType, control_point_count: usize) -> usize {
    let working = working_point_count(pathway, control_point_count);
    match working {
        0 => 0,
        1 => 1,
        _ => {
            let step = pathway.step_size();
            let full = (working + 1).saturating_sub(pathway.control_point_arity());
            let mut count = full.div_ceil(step);
            if pathway.is_bezier() && (working - 1) % step != 0 {
                count += 1;
            }
            count
        }
    }
}

/// An ordered list of control points joined into curve segments.
///
/// Positions along the path are addressed by a ratio in `[0, 1]` of the
/// control polygon's length. Derived data (working points, step distances,
/// segments) is recomputed together by [`update_path_data`](Self::update_path_data);
/// subdivided point arrays are sampled per segment on first access.
///
/// ```
/// use rhizome_waypath_path::{Path, PathConfig};
/// use glam::Vec3;
///
/// let path = Path::from_points(
///     [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
///     PathConfig::default(),
/// )
/// .unwrap();
/// let mid = path.point_at(0.5).unwrap();
/// assert!((mid - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
/// ```
#[derive(Debug, Default)]
pub struct Path {
    config: PathConfig,
    control_points: Vec<Vec3>,
    working_points: Vec<Vec3>,
    /// Distance from each working point to the next; the last entry is 0.
    step_distances: Vec<f32>,
    total_length: f32,
    segments: Vec<Segment>,
    segment_pool: Pool<Segment>,
    sample_cache: HashMap<usize, Vec<Vec3>>,
}

impl Path {
    /// Creates an empty path.
    pub fn new(config: PathConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Creates a path through `points`.
    pub fn from_points(
        points: impl IntoIterator<Item = Vec3>,
        config: PathConfig,
    ) -> Result<Self, PathError> {
        let mut path = Self::default();
        path.init_from_points(points, config)?;
        Ok(path)
    }

    /// Replaces every control point and the configuration, then recomputes.
    pub fn init_from_points(
        &mut self,
        points: impl IntoIterator<Item = Vec3>,
        config: PathConfig,
    ) -> Result<(), PathError> {
        config.validate()?;
        self.config = config;
        self.control_points.clear();
        self.control_points.extend(points);
        self.update_path_data();
        Ok(())
    }

    /// Like [`init_from_points`](Self::init_from_points), reading positions
    /// from handles. Missing handles are skipped with a warning.
    pub fn init_from_handles<H, I>(&mut self, handles: I, config: PathConfig) -> Result<(), PathError>
    where
        H: PositionSource,
        I: IntoIterator<Item = Option<H>>,
    {
        config.validate()?;
        let points = collect_positions(handles);
        self.init_from_points(points, config)
    }

    /// Appends a control point.
    pub fn add_point(&mut self, point: Vec3, update_path_data: bool) {
        self.control_points.push(point);
        if update_path_data {
            self.update_path_data();
        }
    }

    /// Inserts a control point before `index`; `index == len` appends.
    pub fn insert_point(
        &mut self,
        point: Vec3,
        index: usize,
        update_path_data: bool,
    ) -> Result<(), PathError> {
        let len = self.control_points.len();
        if index > len {
            log::debug!("rejected insert at {index}, valid range 0..={len}");
            return Err(PathError::IndexOutOfRange { index, len });
        }
        self.control_points.insert(index, point);
        if update_path_data {
            self.update_path_data();
        }
        Ok(())
    }

    /// Removes and returns the control point at `index`.
    pub fn remove_point(&mut self, index: usize, update_path_data: bool) -> Result<Vec3, PathError> {
        let len = self.control_points.len();
        if index >= len {
            log::debug!("rejected removal at {index}, valid range 0..{len}");
            return Err(PathError::IndexOutOfRange { index, len });
        }
        let removed = self.control_points.remove(index);
        if update_path_data {
            self.update_path_data();
        }
        Ok(removed)
    }

    /// Removes every control point.
    pub fn clear(&mut self) {
        self.control_points.clear();
        self.update_path_data();
    }

    /// Recomputes working points, step distances, total length and segments,
    /// and drops every cached sample array.
    pub fn update_path_data(&mut self) {
        self.rebuild_working_points();
        self.rebuild_step_distances();
        self.rebuild_segments();
        self.sample_cache.clear();

        debug_assert_eq!(
            self.segments.len(),
            expected_segment_count(self.config.pathway, self.control_points.len())
        );
        log::trace!(
            "{} path: {} points, {} segments, length {}",
            self.config.pathway,
            self.control_points.len(),
            self.segments.len(),
            self.total_length
        );
    }

    /// Changes the pathway type and recomputes.
    pub fn set_pathway_type(&mut self, pathway: PathwayType) {
        self.config.pathway = pathway;
        self.update_path_data();
    }

    /// Changes the easing applied by [`point_at`](Self::point_at).
    pub fn set_ease(&mut self, ease: Ease) {
        self.config.ease = ease;
    }

    /// Changes the subdivision count. Sample arrays are rebuilt on next access.
    pub fn set_subdivisions(&mut self, subdivisions: u32) -> Result<(), PathError> {
        if subdivisions == 0 {
            return Err(PathError::ZeroSubdivisions);
        }
        if subdivisions != self.config.subdivisions {
            self.config.subdivisions = subdivisions;
            self.sample_cache.clear();
        }
        Ok(())
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn pathway_type(&self) -> PathwayType {
        self.config.pathway
    }

    pub fn ease(&self) -> Ease {
        self.config.ease
    }

    pub fn subdivisions(&self) -> u32 {
        self.config.subdivisions
    }

    /// Caller-supplied points, in order.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Control points after pathway padding, as of the last recompute.
    pub fn working_points(&self) -> &[Vec3] {
        &self.working_points
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Length of the control polygon the segments traverse.
    ///
    /// Equals the sum of segment lengths. For Catmull-Rom the synthetic
    /// padding points are not part of it.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Distance from working point `index` to the next one.
    pub fn step_distance(&self, index: usize) -> Result<f32, PathError> {
        self.step_distances
            .get(index)
            .copied()
            .ok_or(PathError::IndexOutOfRange {
                index,
                len: self.step_distances.len(),
            })
    }

    /// Position at path ratio `t`, after easing.
    ///
    /// `t` is clamped to `[0, 1]`. A single-point path returns that point
    /// for every `t`.
    pub fn point_at(&self, t: f32) -> Result<Vec3, PathError> {
        match self.working_points.len() {
            0 => Err(PathError::EmptyPath),
            1 => Ok(self.working_points[0]),
            _ => {
                let progress = self.config.ease.apply(t.clamp(0.0, 1.0));
                let (index, segment_t) = self.locate(progress);
                self.evaluate_segment(index, segment_t)
            }
        }
    }

    /// Index of the first segment whose ratio interval contains `t`.
    pub fn segment_index_for_ratio(&self, t: f32) -> Result<usize, PathError> {
        if self.segments.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let ratio = t.clamp(0.0, 1.0);
        self.segments
            .iter()
            .position(|segment| segment.contains_ratio(ratio))
            .ok_or_else(|| {
                log::error!("no segment covers ratio {ratio}; segmentation is inconsistent");
                PathError::SegmentNotFound { ratio }
            })
    }

    /// Evaluates segment `index` at local parameter `t`.
    pub fn evaluate_segment(&self, index: usize, t: f32) -> Result<Vec3, PathError> {
        let segment = self.segments.get(index).ok_or(PathError::SegmentIndexOutOfRange {
            index,
            count: self.segments.len(),
        })?;
        let window = self.segment_window(segment);
        Ok(self.config.pathway.evaluate(&window, t)?)
    }

    /// Sampled points of segment `index`, `subdivisions + 1` of them.
    ///
    /// Computed on first access and cached until the next recompute or
    /// subdivision change.
    pub fn subdivided_points(&mut self, index: usize) -> Result<&[Vec3], PathError> {
        let segment = self.segments.get(index).ok_or(PathError::SegmentIndexOutOfRange {
            index,
            count: self.segments.len(),
        })?;
        let window = self.segment_window(segment);
        let pathway = self.config.pathway;
        let subdivisions = self.config.subdivisions;

        let points = match self.sample_cache.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(pathway.sample(&window, subdivisions)?),
        };
        Ok(points.as_slice())
    }

    /// Polyline length of segment `index`'s sample array.
    pub fn segment_subdivided_length(&mut self, index: usize) -> Result<f32, PathError> {
        Ok(polyline_length(self.subdivided_points(index)?))
    }

    /// Sum of every segment's sampled polyline length.
    ///
    /// Approximates the drawn curve's length, unlike [`total_length`](Self::total_length).
    pub fn total_subdivided_length(&mut self) -> Result<f32, PathError> {
        let mut total = 0.0;
        for index in 0..self.segments.len() {
            total += self.segment_subdivided_length(index)?;
        }
        Ok(total)
    }

    /// Finds the segment owning `progress` of the total length, and the local
    /// parameter inside it.
    ///
    /// Every progress maps to exactly one segment: the first one whose
    /// cumulative length exceeds the target distance, or the last one.
    fn locate(&self, progress: f32) -> (usize, f32) {
        let last = self.segments.len() - 1;
        let mut residual = progress * self.total_length;
        for (index, segment) in self.segments.iter().enumerate() {
            residual -= segment.length();
            if residual < 0.0 || index == last {
                let length = segment.length();
                let segment_t = if length > f32::EPSILON {
                    (length + residual) / length
                } else {
                    1.0
                };
                return (index, segment_t);
            }
        }
        (last, 1.0)
    }

    fn segment_window(&self, segment: &Segment) -> [Vec3; 4] {
        segment
            .window_indices(self.working_points.len())
            .map(|i| self.working_points[i])
    }

    fn rebuild_working_points(&mut self) {
        self.working_points.clear();
        let points = &self.control_points;
        let padded = working_point_count(self.config.pathway, points.len()) > points.len();
        if padded {
            let n = points.len();
            self.working_points.push(points[0] * 2.0 - points[1]);
            self.working_points.extend_from_slice(points);
            self.working_points.push(points[n - 1] * 2.0 - points[n - 2]);
        } else {
            self.working_points.extend_from_slice(points);
        }
    }

    fn rebuild_step_distances(&mut self) {
        self.step_distances.clear();
        let points = &self.working_points;
        self.step_distances.extend(
            (0..points.len()).map(|i| points[i].distance(points[(i + 1).min(points.len() - 1)])),
        );
    }

    fn rebuild_segments(&mut self) {
        for segment in self.segments.drain(..) {
            self.segment_pool.release(segment);
        }
        self.total_length = 0.0;

        let pathway = self.config.pathway;
        let point_count = self.working_points.len();
        if point_count == 0 {
            return;
        }
        if point_count == 1 {
            let mut segment = self.segment_pool.acquire();
            segment.init(0, 0.0, 0.0, 1.0, pathway);
            self.segments.push(segment);
            return;
        }

        let count = expected_segment_count(pathway, self.control_points.len());
        let step = pathway.step_size();
        let (span_start, span_end) = pathway.traversed_span();
        let last_point = point_count - 1;

        let lengths: Vec<f32> = (0..count)
            .map(|i| {
                let start = i * step;
                (start + span_start..start + span_end)
                    .map(|j| self.step_distances[j.min(last_point)])
                    .sum()
            })
            .collect();
        let total: f32 = lengths.iter().sum();

        let mut accumulated = 0.0;
        for (i, &length) in lengths.iter().enumerate() {
            let (first_ratio, last_ratio) = if total > 0.0 {
                let first = accumulated / total;
                accumulated += length;
                (first, accumulated / total)
            } else {
                // Degenerate path: split the ratio range evenly.
                (i as f32 / count as f32, (i + 1) as f32 / count as f32)
            };
            let last_ratio = if i == count - 1 { 1.0 } else { last_ratio };

            let mut segment = self.segment_pool.acquire();
            segment.init(i * step, length, first_ratio, last_ratio, pathway);
            self.segments.push(segment);
        }
        self.total_length = total;
    }
}

impl Recycle for Path {
    fn on_create(&mut self) {
        self.reset();
    }

    fn on_dispose(&mut self) {
        self.reset();
    }
}

impl Path {
    fn reset(&mut self) {
        self.config = PathConfig::default();
        self.control_points.clear();
        self.working_points.clear();
        self.step_distances.clear();
        self.total_length = 0.0;
        for segment in self.segments.drain(..) {
            self.segment_pool.release(segment);
        }
        self.sample_cache.clear();
    }
}
