use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CurveError, Interpolatable, catmull_rom, cubic_bezier, linear, quadratic_bezier};

/// How consecutive control points are joined into curve segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathwayType {
    /// Straight lines between neighbouring points.
    #[default]
    Line,
    /// Quadratic Bezier pieces sharing their end points.
    QuadraticBezier,
    /// Cubic Bezier pieces sharing their end points.
    CubicBezier,
    /// Catmull-Rom spline through every point (sliding window of four).
    CatmullRomSpline,
}

impl PathwayType {
    /// Every pathway type, in code order.
    pub const ALL: [PathwayType; 4] = [
        PathwayType::Line,
        PathwayType::QuadraticBezier,
        PathwayType::CubicBezier,
        PathwayType::CatmullRomSpline,
    ];

    /// Number of points one segment's geometry is built from.
    pub const fn control_point_arity(self) -> usize {
        match self {
            PathwayType::Line => 2,
            PathwayType::QuadraticBezier => 3,
            PathwayType::CubicBezier => 4,
            PathwayType::CatmullRomSpline => 4,
        }
    }

    /// Index advance between the first points of consecutive segments.
    ///
    /// Catmull-Rom windows overlap, so it advances by one despite an arity of four.
    pub const fn step_size(self) -> usize {
        match self {
            PathwayType::Line => 1,
            PathwayType::QuadraticBezier => 2,
            PathwayType::CubicBezier => 3,
            PathwayType::CatmullRomSpline => 1,
        }
    }

    /// Whether segments are Bezier pieces that may need a trailing partial segment.
    pub const fn is_bezier(self) -> bool {
        matches!(
            self,
            PathwayType::QuadraticBezier | PathwayType::CubicBezier
        )
    }

    /// Offsets within a segment window of the points the curve runs between.
    ///
    /// Every type except Catmull-Rom draws from the first to the last window
    /// point; Catmull-Rom draws between the two middle points.
    pub const fn traversed_span(self) -> (usize, usize) {
        match self {
            PathwayType::CatmullRomSpline => (1, 2),
            other => (0, other.step_size()),
        }
    }

    /// Stable integer code, matching the exported data of existing tools.
    pub const fn code(self) -> i32 {
        match self {
            PathwayType::Line => 1,
            PathwayType::QuadraticBezier => 2,
            PathwayType::CubicBezier => 3,
            PathwayType::CatmullRomSpline => 4,
        }
    }

    /// Evaluates the segment defined by the first `arity` points of `window`.
    pub fn evaluate<T: Interpolatable>(self, window: &[T], t: f32) -> Result<T, CurveError> {
        self.check_window(window)?;
        Ok(self.evaluate_checked(window, t))
    }

    /// Samples the segment defined by `window` into `subdivisions + 1` points.
    pub fn sample(self, window: &[Vec3], subdivisions: u32) -> Result<Vec<Vec3>, CurveError> {
        self.check_window(window)?;
        crate::sample(subdivisions, |t| self.evaluate_checked(window, t))
    }

    fn check_window<T>(self, window: &[T]) -> Result<(), CurveError> {
        let expected = self.control_point_arity();
        if window.len() < expected {
            return Err(CurveError::NotEnoughControlPoints {
                expected,
                got: window.len(),
            });
        }
        Ok(())
    }

    /// `window` must hold at least `control_point_arity` points.
    fn evaluate_checked<T: Interpolatable>(self, window: &[T], t: f32) -> T {
        match self {
            PathwayType::Line => linear(window[0], window[1], t),
            PathwayType::QuadraticBezier => quadratic_bezier(window[0], window[1], window[2], t),
            PathwayType::CubicBezier => {
                cubic_bezier(window[0], window[1], window[2], window[3], t)
            }
            PathwayType::CatmullRomSpline => {
                catmull_rom(window[0], window[1], window[2], window[3], t)
            }
        }
    }
}

impl TryFrom<i32> for PathwayType {
    type Error = CurveError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        PathwayType::ALL
            .into_iter()
            .find(|pathway| pathway.code() == code)
            .ok_or(CurveError::UnknownPathwayType(code))
    }
}

impl std::fmt::Display for PathwayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PathwayType::Line => "line",
            PathwayType::QuadraticBezier => "quadratic-bezier",
            PathwayType::CubicBezier => "cubic-bezier",
            PathwayType::CatmullRomSpline => "catmull-rom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_and_step() {
        let table: Vec<_> = PathwayType::ALL
            .iter()
            .map(|p| (p.control_point_arity(), p.step_size()))
            .collect();
        assert_eq!(table, vec![(2, 1), (3, 2), (4, 3), (4, 1)]);
    }

    #[test]
    fn test_code_roundtrip() {
        for pathway in PathwayType::ALL {
            assert_eq!(PathwayType::try_from(pathway.code()), Ok(pathway));
        }
        assert_eq!(
            PathwayType::try_from(0),
            Err(CurveError::UnknownPathwayType(0))
        );
        assert_eq!(
            PathwayType::try_from(5),
            Err(CurveError::UnknownPathwayType(5))
        );
    }

    #[test]
    fn test_evaluate_rejects_short_window() {
        let window = [Vec3::ZERO, Vec3::X];
        let err = PathwayType::CubicBezier.evaluate(&window, 0.5).unwrap_err();
        assert_eq!(
            err,
            CurveError::NotEnoughControlPoints {
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn test_evaluate_ignores_extra_points() {
        let window = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let p = PathwayType::Line.evaluate(&window, 1.0).unwrap();
        assert!((p - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sample_point_count() {
        let window = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        for pathway in PathwayType::ALL {
            let points = pathway.sample(&window, 15).unwrap();
            assert_eq!(points.len(), 16, "{pathway}");
        }
    }

    #[test]
    fn test_sample_zero_subdivisions() {
        let window = [Vec3::ZERO, Vec3::X];
        assert_eq!(
            PathwayType::Line.sample(&window, 0),
            Err(CurveError::ZeroSubdivisions)
        );
    }

    #[test]
    fn test_sample_rejects_short_window() {
        let window = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            PathwayType::CatmullRomSpline.sample(&window, 4),
            Err(CurveError::NotEnoughControlPoints {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_traversed_span() {
        assert_eq!(PathwayType::Line.traversed_span(), (0, 1));
        assert_eq!(PathwayType::QuadraticBezier.traversed_span(), (0, 2));
        assert_eq!(PathwayType::CubicBezier.traversed_span(), (0, 3));
        assert_eq!(PathwayType::CatmullRomSpline.traversed_span(), (1, 2));
    }
}
