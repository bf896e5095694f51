//! Tweening targets along waypath paths.
//!
//! A [`Tweener`] moves one [`Movable`] target along a
//! [`Path`](rhizome_waypath_path::Path) as time is fed to it. A
//! [`TweenerRegistry`] owns many of them, ticks them in registration order
//! and recycles the finished ones.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use glam::Vec3;
//! use rhizome_waypath_tween::{Transform, TweenConfig, TweenerRegistry};
//!
//! let mut registry = TweenerRegistry::new();
//! let crate_box = Rc::new(RefCell::new(Transform::default()));
//!
//! registry
//!     .tween_points(&crate_box, [Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)], TweenConfig::new(3.0))
//!     .unwrap();
//!
//! for _ in 0..3 {
//!     registry.tick(1.0);
//! }
//! assert!(registry.is_empty());
//! assert_eq!(crate_box.borrow().position, Vec3::new(0.0, 0.0, 6.0));
//! ```
//!
//! Targets are held weakly: dropping a target's last `Rc` pauses every
//! tween aimed at it without erroring.

mod error;
mod registry;
mod target;
mod tweener;

pub use error::TweenError;
pub use registry::TweenerRegistry;
pub use target::{Movable, Target, Transform};
pub use tweener::{TweenConfig, TweenId, TweenState, Tweener};

pub use glam;
pub use rhizome_waypath_path as path;
