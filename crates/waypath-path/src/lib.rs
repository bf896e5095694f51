//! Multi-segment paths for waypath.
//!
//! A [`Path`] joins an ordered list of control points into curve segments
//! of one [`PathwayType`], and answers position queries by normalized
//! distance along its control polygon:
//!
//! ```
//! use rhizome_waypath_path::{Path, PathConfig, PathwayType};
//! use glam::Vec3;
//!
//! let config = PathConfig::default().with_pathway(PathwayType::CatmullRomSpline);
//! let path = Path::from_points(
//!     [Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0), Vec3::new(4.0, 0.0, 0.0)],
//!     config,
//! )
//! .unwrap();
//!
//! assert_eq!(path.segment_count(), 2);
//! assert!((path.point_at(1.0).unwrap() - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
//! ```
//!
//! Also here:
//! - [`Segment`] - one curve piece and the ratio interval it covers
//! - [`Pool`] / [`Pools`] - free lists for reusable paths, segments and tweeners
//! - [`PositionSource`] - anything a path can read control points from
//! - [`export`] - `index,x;y;z,kind` text records for control points

mod error;
pub mod export;
mod path;
mod pool;
mod segment;
mod source;

pub use error::{ExportError, PathError};
pub use export::{ExportRecord, PathPointKind};
pub use path::{Path, PathConfig, expected_segment_count, working_point_count};
pub use pool::{Pool, Pools, Recycle};
pub use rhizome_waypath_curve::PathwayType;
pub use rhizome_waypath_easing::Ease;
pub use segment::Segment;
pub use source::{PositionSource, collect_positions};

pub use glam;
