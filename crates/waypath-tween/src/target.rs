//! What a tweener moves.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec3;
use rhizome_waypath_path::PositionSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something with a position and a facing direction that a tweener can drive.
pub trait Movable {
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Unit vector the object faces.
    fn forward(&self) -> Vec3;

    fn set_forward(&mut self, forward: Vec3);
}

/// A minimal position + facing pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

impl Transform {
    /// A transform at `position` facing +Z.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Movable for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn set_forward(&mut self, forward: Vec3) {
        self.forward = forward;
    }
}

impl PositionSource for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Non-owning handle to a tweener's target.
///
/// The tweener never keeps its target alive; once the owner drops it,
/// ticks leave the tweener untouched.
#[derive(Clone)]
pub struct Target(Weak<RefCell<dyn Movable>>);

impl Target {
    /// Handle to `target`.
    pub fn new<T: Movable + 'static>(target: &Rc<RefCell<T>>) -> Self {
        let weak = Rc::downgrade(target);
        let weak: Weak<RefCell<dyn Movable>> = weak;
        Self(weak)
    }

    /// Whether the target still exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Strong reference to the target, if it still exists.
    pub fn upgrade(&self) -> Option<Rc<RefCell<dyn Movable>>> {
        self.0.upgrade()
    }
}

impl<T: Movable + 'static> From<&Rc<RefCell<T>>> for Target {
    fn from(target: &Rc<RefCell<T>>) -> Self {
        Self::new(target)
    }
}

impl From<Weak<RefCell<dyn Movable>>> for Target {
    fn from(target: Weak<RefCell<dyn Movable>>) -> Self {
        Self(target)
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_does_not_keep_alive() {
        let transform = Rc::new(RefCell::new(Transform::default()));
        let target = Target::new(&transform);
        assert!(target.is_alive());
        drop(transform);
        assert!(!target.is_alive());
        assert!(target.upgrade().is_none());
    }

    #[test]
    fn test_target_writes_through() {
        let transform = Rc::new(RefCell::new(Transform::default()));
        let target: Target = (&transform).into();
        if let Some(movable) = target.upgrade() {
            movable.borrow_mut().set_position(Vec3::ONE);
        }
        assert_eq!(transform.borrow().position, Vec3::ONE);
    }

    #[test]
    fn test_target_from_concrete_rc() {
        let transform = Rc::new(RefCell::new(Transform::from_position(Vec3::X)));
        let target = Target::new(&transform);
        let position = target.upgrade().map(|movable| movable.borrow().position());
        assert_eq!(position, Some(Vec3::X));
    }

    #[test]
    fn test_transform_as_position_source() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(PositionSource::position(&transform), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.forward, Vec3::Z);
    }
}
