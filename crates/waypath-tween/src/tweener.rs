use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use rhizome_waypath_path::{Path, PathConfig, PositionSource, Recycle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::target::Target;

/// Remaining progress below which a one-shot tween counts as finished.
const COMPLETION_EPSILON: f32 = 1e-6;

/// Squared movement below which the facing direction is left alone.
const FORWARD_EPSILON: f32 = 1e-12;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique tweener id. `0` means "not initialized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TweenId(u64);

impl TweenId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Lifecycle state of a [`Tweener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TweenState {
    /// Advances on every tick.
    Active,
    /// Ticks are ignored until resumed.
    Paused,
    /// Finished or cancelled. Terminal.
    #[default]
    Completed,
}

/// Timing and behavior of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TweenConfig {
    /// Seconds to traverse the whole path. Zero jumps straight to the end.
    pub duration: f32,
    /// Wrap around at the end instead of completing.
    pub looping: bool,
    /// Turn the target to face its direction of travel.
    pub update_forward: bool,
    /// Shape of the path. Used when the tweener builds its own path, and
    /// overwritten by the path's configuration otherwise.
    pub path: PathConfig,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            looping: false,
            update_forward: false,
            path: PathConfig::default(),
        }
    }
}

impl TweenConfig {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    /// Builder: set duration in seconds.
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Builder: set looping.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Builder: set forward updates.
    pub fn with_update_forward(mut self, update_forward: bool) -> Self {
        self.update_forward = update_forward;
        self
    }

    /// Builder: set the configuration of paths built from points.
    pub fn with_path(mut self, path: PathConfig) -> Self {
        self.path = path;
        self
    }

    fn validate(&self) -> Result<(), TweenError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        Ok(())
    }
}

/// Moves one target along a [`Path`] over time.
///
/// Elapsed time only advances through [`tick`](Self::tick). Progress is
/// `elapsed / duration`, wrapped when looping and clamped otherwise, and is
/// eased by the path's own [`Ease`](rhizome_waypath_path::Ease).
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use glam::Vec3;
/// use rhizome_waypath_tween::{Target, Transform, TweenConfig, TweenState, Tweener};
///
/// let transform = Rc::new(RefCell::new(Transform::default()));
/// let mut tweener = Tweener::from_points(
///     Target::new(&transform),
///     [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
///     TweenConfig::new(2.0),
/// )
/// .unwrap();
///
/// assert_eq!(tweener.tick(1.0), Ok(TweenState::Active));
/// assert!((transform.borrow().position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
/// ```
#[derive(Default)]
pub struct Tweener {
    id: TweenId,
    target: Option<Target>,
    path: Path,
    config: TweenConfig,
    elapsed: f32,
    progress: f32,
    state: TweenState,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tweener {
    /// Creates a tweener along an existing path.
    pub fn new(
        target: impl Into<Target>,
        path: Path,
        config: TweenConfig,
    ) -> Result<Self, TweenError> {
        let mut tweener = Self::default();
        tweener.init(target.into(), path, config)?;
        Ok(tweener)
    }

    /// Creates a tweener along a path through `points`, shaped by `config.path`.
    pub fn from_points(
        target: impl Into<Target>,
        points: impl IntoIterator<Item = Vec3>,
        config: TweenConfig,
    ) -> Result<Self, TweenError> {
        let path = Path::from_points(points, config.path)?;
        Self::new(target, path, config)
    }

    /// Creates a tweener along a path through `handles`. Missing handles
    /// are skipped.
    pub fn from_handles<H, I>(
        target: impl Into<Target>,
        handles: I,
        config: TweenConfig,
    ) -> Result<Self, TweenError>
    where
        H: PositionSource,
        I: IntoIterator<Item = Option<H>>,
    {
        let mut path = Path::new(config.path);
        path.init_from_handles(handles, config.path)?;
        Self::new(target, path, config)
    }

    /// Checks that a tween over `path` towards `target` can start.
    pub fn validate(target: &Target, path: &Path, config: &TweenConfig) -> Result<(), TweenError> {
        if !target.is_alive() {
            return Err(TweenError::DeadTarget);
        }
        if path.is_empty() {
            return Err(TweenError::EmptyPath);
        }
        config.validate()
    }

    /// Starts a fresh tween, replacing all previous state and assigning a new id.
    ///
    /// Nothing changes if validation fails. `config.path` is replaced by the
    /// configuration `path` was built with.
    pub fn init(&mut self, target: Target, path: Path, config: TweenConfig) -> Result<(), TweenError> {
        Self::validate(&target, &path, &config)?;
        self.id = TweenId::next();
        self.target = Some(target);
        self.config = TweenConfig {
            path: *path.config(),
            ..config
        };
        self.path = path;
        self.elapsed = 0.0;
        self.progress = 0.0;
        self.state = TweenState::Active;
        self.on_complete = None;
        log::debug!(
            "{} started: {} points over {}s{}",
            self.id,
            self.path.len(),
            config.duration,
            if config.looping { ", looping" } else { "" }
        );
        Ok(())
    }

    /// Sets the callback run once when the tween completes on its own.
    pub fn set_on_complete(&mut self, callback: impl FnOnce() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Builder form of [`set_on_complete`](Self::set_on_complete).
    pub fn with_on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.set_on_complete(callback);
        self
    }

    /// Advances by `dt` seconds and moves the target.
    ///
    /// Paused and completed tweeners ignore the tick. If the target is gone
    /// the tick is skipped without advancing time.
    pub fn tick(&mut self, dt: f32) -> Result<TweenState, TweenError> {
        if self.state != TweenState::Active {
            return Ok(self.state);
        }
        let Some(target) = self.target.as_ref().and_then(Target::upgrade) else {
            log::trace!("{} skipped tick, target is gone", self.id);
            return Ok(self.state);
        };
        let mut target = target.try_borrow_mut().map_err(|_| TweenError::TargetBusy)?;

        let elapsed = self.elapsed + dt;
        let raw = if self.config.duration > 0.0 {
            elapsed / self.config.duration
        } else {
            1.0
        };
        let progress = if self.config.looping {
            raw.rem_euclid(1.0)
        } else {
            raw.clamp(0.0, 1.0)
        };
        let position = self.path.point_at(progress)?;

        self.elapsed = elapsed;
        self.progress = progress;
        let previous = target.position();
        target.set_position(position);
        if self.config.update_forward {
            let delta = position - previous;
            if delta.length_squared() > FORWARD_EPSILON {
                target.set_forward(delta.normalize());
            }
        }
        drop(target);

        if !self.config.looping && 1.0 - self.progress < COMPLETION_EPSILON {
            self.complete();
        }
        Ok(self.state)
    }

    /// Stops advancing until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if self.state == TweenState::Active {
            self.state = TweenState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == TweenState::Paused {
            self.state = TweenState::Active;
        }
    }

    /// Ends the tween immediately. The completion callback is dropped unrun.
    pub fn cancel(&mut self) {
        if self.state != TweenState::Completed {
            log::debug!("{} cancelled at progress {}", self.id, self.progress);
        }
        self.state = TweenState::Completed;
        self.on_complete = None;
    }

    fn complete(&mut self) {
        self.state = TweenState::Completed;
        log::debug!("{} completed after {}s", self.id, self.elapsed);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TweenState::Active
    }

    pub fn is_paused(&self) -> bool {
        self.state == TweenState::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.state == TweenState::Completed
    }

    /// Seconds of unpaused ticking so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Path ratio written on the last tick, before easing.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutable access to the path. Edits take effect on the next tick.
    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Moves the path out, leaving an empty one behind.
    pub fn take_path(&mut self) -> Path {
        std::mem::take(&mut self.path)
    }
}

impl Recycle for Tweener {
    fn on_dispose(&mut self) {
        self.id = TweenId::default();
        self.target = None;
        self.path.on_dispose();
        self.config = TweenConfig::default();
        self.elapsed = 0.0;
        self.progress = 0.0;
        self.state = TweenState::Completed;
        self.on_complete = None;
    }
}

impl fmt::Debug for Tweener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweener")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("progress", &self.progress)
            .field("config", &self.config)
            .field("points", &self.path.len())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
