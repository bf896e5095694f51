//! Free-list pools for reusable value objects.
//!
//! [`Pool::acquire`] moves an instance out of the pool, so the caller is its
//! only owner until it is moved back with [`Pool::release`]. Both directions
//! run a [`Recycle`] hook so no state leaks from one use to the next.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Hooks run when a pooled value is checked out and returned.
pub trait Recycle: Default {
    /// Called after the value leaves the pool.
    fn on_create(&mut self) {}

    /// Called before the value goes back into the pool. Must drop all
    /// per-use state.
    fn on_dispose(&mut self);
}

/// A free list of idle instances of one type.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Vec<T>,
    created: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            idle: Vec::new(),
            created: 0,
        }
    }
}

impl<T: Recycle> Pool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool pre-filled with `count` idle instances.
    pub fn with_capacity(count: usize) -> Self {
        let mut idle = Vec::with_capacity(count);
        idle.resize_with(count, T::default);
        Self {
            idle,
            created: count,
        }
    }

    /// Takes an idle instance, or builds a new one if none is left.
    pub fn acquire(&mut self) -> T {
        let mut value = match self.idle.pop() {
            Some(value) => value,
            None => {
                self.created += 1;
                T::default()
            }
        };
        value.on_create();
        value
    }

    /// Resets `value` and keeps it for the next [`acquire`](Self::acquire).
    pub fn release(&mut self, mut value: T) {
        value.on_dispose();
        self.idle.push(value);
    }

    /// Number of idle instances ready for reuse.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Number of instances this pool has ever built.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Drops every idle instance.
    pub fn clear(&mut self) {
        self.idle.clear();
    }
}

/// One [`Pool`] per value type, created on first use.
#[derive(Default)]
pub struct Pools {
    pools: HashMap<TypeId, Box<dyn Any>>,
}

impl Pools {
    /// Creates an empty pool set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks out a `T` from its pool.
    pub fn acquire<T: Recycle + 'static>(&mut self) -> T {
        self.pool_mut::<T>().acquire()
    }

    /// Returns a `T` to its pool.
    pub fn release<T: Recycle + 'static>(&mut self, value: T) {
        self.pool_mut::<T>().release(value);
    }

    /// The pool for `T`, if anything of that type was ever pooled.
    pub fn pool<T: Recycle + 'static>(&self) -> Option<&Pool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_ref::<Pool<T>>())
    }

    /// Drops every idle instance of every type.
    pub fn clear(&mut self) {
        self.pools.clear();
    }

    fn pool_mut<T: Recycle + 'static>(&mut self) -> &mut Pool<T> {
        self.pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Pool::<T>::new()))
            .downcast_mut::<Pool<T>>()
            .expect("pool stored under its own TypeId")
    }
}

impl std::fmt::Debug for Pools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pools")
            .field("types", &self.pools.len())
            .finish()
    }
}
