use glam::Vec3;
use rhizome_waypath_path::{Path, Pools, PositionSource};

use crate::error::TweenError;
use crate::target::Target;
use crate::tweener::{TweenConfig, TweenId, TweenState, Tweener};

/// Owns live tweeners and ticks them once per frame.
///
/// Tweeners run in registration order. Completed ones are removed during
/// the tick that finishes them, and their paths and tweener shells are
/// returned to internal pools for the next `tween_*` call.
///
/// The embedder owns the registry and decides when to call [`tick`](Self::tick).
#[derive(Debug, Default)]
pub struct TweenerRegistry {
    tweeners: Vec<Tweener>,
    pools: Pools,
}

impl TweenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an initialized tweener.
    ///
    /// Tweeners that were never initialized, or whose target is already
    /// gone, are rejected with [`TweenError::DeadTarget`].
    pub fn add(&mut self, tweener: Tweener) -> Result<TweenId, TweenError> {
        let id = tweener.id();
        if id == TweenId::default() || !tweener.target().is_some_and(Target::is_alive) {
            log::debug!("rejected registration of {id} without a live target");
            return Err(TweenError::DeadTarget);
        }
        if self.contains(id) {
            log::debug!("rejected duplicate registration of {id}");
            return Err(TweenError::DuplicateId(id));
        }
        self.tweeners.push(tweener);
        Ok(id)
    }

    /// Builds a pooled tweener along a path through `points` and registers it.
    pub fn tween_points(
        &mut self,
        target: impl Into<Target>,
        points: impl IntoIterator<Item = Vec3>,
        config: TweenConfig,
    ) -> Result<TweenId, TweenError> {
        let mut path: Path = self.pools.acquire();
        if let Err(err) = path.init_from_points(points, config.path) {
            self.pools.release(path);
            return Err(err.into());
        }
        self.tween_path(target, path, config)
    }

    /// Builds a pooled tweener along a path through `handles` and registers it.
    /// Missing handles are skipped.
    pub fn tween_handles<H, I>(
        &mut self,
        target: impl Into<Target>,
        handles: I,
        config: TweenConfig,
    ) -> Result<TweenId, TweenError>
    where
        H: PositionSource,
        I: IntoIterator<Item = Option<H>>,
    {
        let mut path: Path = self.pools.acquire();
        if let Err(err) = path.init_from_handles(handles, config.path) {
            self.pools.release(path);
            return Err(err.into());
        }
        self.tween_path(target, path, config)
    }

    /// Builds a pooled tweener along `path` and registers it.
    pub fn tween_path(
        &mut self,
        target: impl Into<Target>,
        path: Path,
        config: TweenConfig,
    ) -> Result<TweenId, TweenError> {
        let target = target.into();
        if let Err(err) = Tweener::validate(&target, &path, &config) {
            self.pools.release(path);
            return Err(err);
        }
        let mut tweener: Tweener = self.pools.acquire();
        tweener.init(target, path, config)?;
        self.add(tweener)
    }

    /// Advances every registered tweener by `dt` seconds.
    ///
    /// Tweeners that complete are removed and recycled. A tweener whose tick
    /// fails, or whose target has been dropped, is cancelled and removed;
    /// the others still run.
    pub fn tick(&mut self, dt: f32) {
        let mut index = 0;
        while index < self.tweeners.len() {
            let tweener = &mut self.tweeners[index];
            let orphaned = tweener.target().is_none_or(|target| !target.is_alive());
            let finished = if orphaned {
                log::debug!("{} lost its target and was cancelled", tweener.id());
                tweener.cancel();
                true
            } else {
                match tweener.tick(dt) {
                    Ok(state) => state == TweenState::Completed,
                    Err(err) => {
                        log::error!("{} failed and was cancelled: {err}", tweener.id());
                        tweener.cancel();
                        true
                    }
                }
            };
            if finished {
                let tweener = self.tweeners.remove(index);
                self.recycle(tweener);
            } else {
                index += 1;
            }
        }
    }

    /// Unregisters and recycles the tweener with `id` without cancelling it.
    pub fn remove_by_id(&mut self, id: TweenId) -> Result<(), TweenError> {
        let tweener = self.detach(id)?;
        self.recycle(tweener);
        Ok(())
    }

    /// Cancels the tweener with `id`, skipping its completion callback, then
    /// unregisters and recycles it.
    pub fn cancel(&mut self, id: TweenId) -> Result<(), TweenError> {
        let mut tweener = self.detach(id)?;
        tweener.cancel();
        self.recycle(tweener);
        Ok(())
    }

    /// Unregisters the tweener with `id` and hands it back to the caller.
    pub fn detach(&mut self, id: TweenId) -> Result<Tweener, TweenError> {
        match self.position(id) {
            Some(index) => Ok(self.tweeners.remove(index)),
            None => {
                log::debug!("{id} is not registered");
                Err(TweenError::NotFound(id))
            }
        }
    }

    /// Unregisters and recycles every tweener. Returns how many there were.
    pub fn remove_all(&mut self) -> usize {
        let count = self.tweeners.len();
        let drained: Vec<Tweener> = self.tweeners.drain(..).collect();
        for tweener in drained {
            self.recycle(tweener);
        }
        if count > 0 {
            log::debug!("removed all {count} tweeners");
        }
        count
    }

    pub fn get(&self, id: TweenId) -> Option<&Tweener> {
        self.tweeners.iter().find(|tweener| tweener.id() == id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tweener> {
        self.tweeners.iter_mut().find(|tweener| tweener.id() == id)
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tweeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweeners.is_empty()
    }

    /// Registered tweeners in tick order.
    pub fn iter(&self) -> impl Iterator<Item = &Tweener> {
        self.tweeners.iter()
    }

    /// Idle paths and tweeners kept for reuse.
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    fn position(&self, id: TweenId) -> Option<usize> {
        self.tweeners.iter().position(|tweener| tweener.id() == id)
    }

    fn recycle(&mut self, mut tweener: Tweener) {
        let path = tweener.take_path();
        self.pools.release(path);
        self.pools.release(tweener);
    }
}
