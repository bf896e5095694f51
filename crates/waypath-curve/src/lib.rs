//! Segment evaluators for waypath.
//!
//! Provides the curve math every path is built from:
//! - [`linear`] - straight line between two points
//! - [`quadratic_bezier`] - three-point Bezier
//! - [`cubic_bezier`] - four-point Bezier
//! - [`catmull_rom`] - uniform Catmull-Rom, drawn between the two middle points
//!
//! [`PathwayType`] ties each evaluator to its control-point arity and the
//! stride between consecutive segments, and dispatches to the right one.
//!
//! All evaluators take `t` in `[0, 1]` and do not clamp it.
//!
//! ```
//! use rhizome_waypath_curve::{PathwayType, sample};
//! use glam::Vec3;
//!
//! let window = [Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
//! let points = PathwayType::QuadraticBezier.sample(&window, 8).unwrap();
//! assert_eq!(points.len(), 9);
//! ```

use std::ops::{Add, Mul, Sub};

use glam::Vec3;

mod error;
mod pathway;

pub use error::CurveError;
pub use glam;
pub use pathway::PathwayType;

/// Trait for types that can be interpolated along a curve.
pub trait Interpolatable:
    Clone + Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl Interpolatable for f32 {}
impl Interpolatable for glam::Vec2 {}
impl Interpolatable for Vec3 {}

/// Evaluates the line from `p0` to `p1`.
#[inline]
pub fn linear<T: Interpolatable>(p0: T, p1: T, t: f32) -> T {
    p0 * (1.0 - t) + p1 * t
}

/// Evaluates a quadratic Bezier curve.
#[inline]
pub fn quadratic_bezier<T: Interpolatable>(p0: T, p1: T, p2: T, t: f32) -> T {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Evaluates a cubic Bezier curve.
#[inline]
pub fn cubic_bezier<T: Interpolatable>(p0: T, p1: T, p2: T, p3: T, t: f32) -> T {
    let t2 = t * t;
    let t3 = t2 * t;
    let u = 1.0 - t;
    let u2 = u * u;
    let u3 = u2 * u;

    // B(t) = (1-t)³P0 + 3(1-t)²tP1 + 3(1-t)t²P2 + t³P3
    p0 * u3 + p1 * (3.0 * u2 * t) + p2 * (3.0 * u * t2) + p3 * t3
}

/// Evaluates a uniform Catmull-Rom segment.
///
/// The curve runs from `p1` (t = 0) to `p2` (t = 1); `p0` and `p3` only
/// shape the tangents at either end.
#[inline]
pub fn catmull_rom<T: Interpolatable>(p0: T, p1: T, p2: T, p3: T, t: f32) -> T {
    let t2 = t * t;
    let t3 = t2 * t;

    // P(t) = 0.5 * [(2P1) + (-P0 + P2)t + (2P0 - 5P1 + 4P2 - P3)t² + (-P0 + 3P1 - 3P2 + P3)t³]
    let c0 = p1 * 2.0;
    let c1 = p2 - p0;
    let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let c3 = p1 * 3.0 - p0 - p2 * 3.0 + p3;

    (c0 + c1 * t + c2 * t2 + c3 * t3) * 0.5
}

/// Samples `eval` at `t = i / subdivisions` for `i` in `0..=subdivisions`.
///
/// Returns `subdivisions + 1` points, both ends included.
pub fn sample<T, F>(subdivisions: u32, eval: F) -> Result<Vec<T>, CurveError>
where
    F: Fn(f32) -> T,
{
    if subdivisions == 0 {
        return Err(CurveError::ZeroSubdivisions);
    }
    let step = subdivisions as f32;
    Ok((0..=subdivisions).map(|i| eval(i as f32 / step)).collect())
}

/// Sum of the distances between consecutive points.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        let mid = linear(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.5);
        assert!((mid - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_quadratic_endpoints() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(1.0, 2.0, 0.0);
        let p2 = Vec3::new(2.0, 0.0, 0.0);

        assert!((quadratic_bezier(p0, p1, p2, 0.0) - p0).length() < 1e-5);
        assert!((quadratic_bezier(p0, p1, p2, 1.0) - p2).length() < 1e-5);
        // u²p0 + 2ut·p1 + t²p2 at t = 0.5
        let mid = quadratic_bezier(p0, p1, p2, 0.5);
        assert!((mid - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_cubic_matches_de_casteljau() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(0.0, 1.0, 0.0);
        let p2 = Vec3::new(1.0, 1.0, 0.0);
        let p3 = Vec3::new(1.0, 0.0, 0.0);

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let a = linear(p0, p1, t);
            let b = linear(p1, p2, t);
            let c = linear(p2, p3, t);
            let ab = linear(a, b, t);
            let bc = linear(b, c, t);
            let expected = linear(ab, bc, t);
            assert!((cubic_bezier(p0, p1, p2, p3, t) - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_catmull_rom_passes_through_inner_points() {
        let p0 = Vec3::new(-1.0, 0.0, 0.0);
        let p1 = Vec3::ZERO;
        let p2 = Vec3::new(1.0, 1.0, 0.0);
        let p3 = Vec3::new(2.0, 0.0, 0.0);

        assert!((catmull_rom(p0, p1, p2, p3, 0.0) - p1).length() < 1e-5);
        assert!((catmull_rom(p0, p1, p2, p3, 1.0) - p2).length() < 1e-5);
    }

    #[test]
    fn test_catmull_rom_collinear_is_straight() {
        let points = [0.0, 1.0, 2.0, 3.0].map(|x| Vec3::new(x, 0.0, 0.0));
        let mid = catmull_rom(points[0], points[1], points[2], points[3], 0.5);
        assert!((mid - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_sample_includes_both_ends() {
        let samples = sample(4, |t| linear(0.0f32, 8.0, t)).unwrap();
        assert_eq!(samples, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_sample_rejects_zero_subdivisions() {
        let result = sample(0, |t| t);
        assert_eq!(result, Err(CurveError::ZeroSubdivisions));
    }

    #[test]
    fn test_polyline_length() {
        let points = [
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 4.0, 0.0),
        ];
        assert!((polyline_length(&points) - 7.0).abs() < 1e-5);
        assert_eq!(polyline_length(&points[..1]), 0.0);
        assert_eq!(polyline_length(&[]), 0.0);
    }

    #[test]
    fn test_vec2_curves() {
        let p0 = glam::Vec2::ZERO;
        let p1 = glam::Vec2::new(1.0, 1.0);
        let p2 = glam::Vec2::new(2.0, 0.0);
        let end = quadratic_bezier(p0, p1, p2, 1.0);
        assert!((end - p2).length() < 1e-5);
    }
}

/// Invariant tests for the evaluators.
///
/// Run with:
///
/// ```sh
/// cargo test -p rhizome-waypath-curve --features invariant-tests
/// ```
#[cfg(all(test, feature = "invariant-tests"))]
mod invariant_tests {
    use super::*;

    /// Sampled length should approach the true length as subdivisions double.
    #[test]
    fn test_sampled_length_converges() {
        let window = [
            Vec3::ZERO,
            Vec3::new(1.0, 3.0, 0.0),
            Vec3::new(2.0, -3.0, 1.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        for pathway in PathwayType::ALL {
            let reference = polyline_length(&pathway.sample(&window, 4096).unwrap());
            let mut prev_error = f32::INFINITY;
            for n in [1, 2, 4, 8, 16, 32, 64] {
                let len = polyline_length(&pathway.sample(&window, n).unwrap());
                let error = (reference - len).abs();
                assert!(
                    error <= prev_error + 1e-4,
                    "{pathway:?}: error grew from {prev_error} to {error} at n={n}"
                );
                prev_error = error;
            }
        }
    }

    /// Inscribed polylines never exceed the reference length.
    #[test]
    fn test_sampled_length_is_lower_bound() {
        for _ in 0..20 {
            let window = [(); 4].map(|_| rand_vec3());
            for pathway in PathwayType::ALL {
                let reference = polyline_length(&pathway.sample(&window, 2048).unwrap());
                let coarse = polyline_length(&pathway.sample(&window, 8).unwrap());
                assert!(coarse <= reference + 1e-3, "{pathway:?}: {coarse} > {reference}");
            }
        }
    }

    /// Evaluators start and end on their anchor points.
    #[test]
    fn test_endpoints() {
        for _ in 0..20 {
            let window = [(); 4].map(|_| rand_vec3());
            for pathway in PathwayType::ALL {
                let start = pathway.evaluate(&window, 0.0).unwrap();
                let end = pathway.evaluate(&window, 1.0).unwrap();
                let (first, last) = match pathway {
                    PathwayType::Line => (window[0], window[1]),
                    PathwayType::QuadraticBezier => (window[0], window[2]),
                    PathwayType::CubicBezier => (window[0], window[3]),
                    PathwayType::CatmullRomSpline => (window[1], window[2]),
                };
                assert!((start - first).length() < 1e-3, "{pathway:?} start");
                assert!((end - last).length() < 1e-3, "{pathway:?} end");
            }
        }
    }

    /// Simple LCG random number generator for tests.
    fn rand_vec3() -> Vec3 {
        use std::cell::Cell;
        thread_local! {
            static SEED: Cell<u64> = const { Cell::new(12345) };
        }
        let mut next = || {
            SEED.with(|seed| {
                let s = seed.get().wrapping_mul(6364136223846793005).wrapping_add(1);
                seed.set(s);
                ((s >> 33) as u32) as f32 / u32::MAX as f32 * 20.0 - 10.0
            })
        };
        Vec3::new(next(), next(), next())
    }
}
