//! Things a path can read control-point positions from.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

/// A handle exposing a world-space position.
pub trait PositionSource {
    /// Current position of the handle.
    fn position(&self) -> Vec3;
}

impl PositionSource for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl PositionSource for [f32; 3] {
    fn position(&self) -> Vec3 {
        Vec3::from_array(*self)
    }
}

impl<T: PositionSource + ?Sized> PositionSource for &T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: PositionSource + ?Sized> PositionSource for Rc<T> {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: PositionSource + ?Sized> PositionSource for RefCell<T> {
    fn position(&self) -> Vec3 {
        self.borrow().position()
    }
}

/// Collects positions from `handles`, skipping missing entries with a warning.
pub fn collect_positions<H, I>(handles: I) -> Vec<Vec3>
where
    H: PositionSource,
    I: IntoIterator<Item = Option<H>>,
{
    handles
        .into_iter()
        .enumerate()
        .filter_map(|(index, handle)| match handle {
            Some(handle) => Some(handle.position()),
            None => {
                log::warn!("skipping missing handle at index {index}");
                None
            }
        })
        .collect()
}
