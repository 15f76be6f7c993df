use crate::cache::LruCache;
use crate::error::BuildError;
use crate::shared::SharedLruCache;
use crate::EvictionListener;

use core::fmt;
use std::hash::{BuildHasher, Hash};

/// A builder for creating [`LruCache`] and [`SharedLruCache`] instances.
pub struct CacheBuilder<K, V, H = ahash::RandomState> {
  capacity: usize,
  hasher: H,
  listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V, H> fmt::Debug for CacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("capacity", &self.capacity)
      .field("has_listener", &self.listener.is_some())
      .finish_non_exhaustive()
  }
}

impl<K, V> CacheBuilder<K, V> {
  /// Creates a builder with no capacity set. `build` fails until
  /// [`capacity`](Self::capacity) is given a positive value.
  pub fn new() -> Self {
    Self {
      capacity: 0,
      hasher: ahash::RandomState::new(),
      listener: None,
    }
  }
}

impl<K, V> Default for CacheBuilder<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V, H> CacheBuilder<K, V, H> {
  /// Sets the maximum number of entries.
  pub fn capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Sets the eviction listener for the cache.
  pub fn eviction_listener<Listener>(mut self, listener: Listener) -> Self
  where
    Listener: EvictionListener<K, V> + 'static,
  {
    self.listener = Some(Box::new(listener));
    self
  }

  /// Replaces the hasher used for the key index.
  pub fn hasher<H2>(self, hasher: H2) -> CacheBuilder<K, V, H2>
  where
    H2: BuildHasher,
  {
    CacheBuilder {
      capacity: self.capacity,
      hasher,
      listener: self.listener,
    }
  }
}

impl<K, V, H> CacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  /// Builds a single-owner cache.
  pub fn build(self) -> Result<LruCache<K, V, H>, BuildError> {
    if self.capacity == 0 {
      return Err(BuildError::ZeroCapacity);
    }
    Ok(LruCache::from_parts(self.capacity, self.hasher, self.listener))
  }

  /// Builds a cache behind a mutex, clonable and shareable across threads.
  ///
  /// The eviction listener runs while that mutex is held. It must not call
  /// back into the same `SharedLruCache`: the lock is not re-entrant and the
  /// call deadlocks.
  pub fn build_shared(self) -> Result<SharedLruCache<K, V, H>, BuildError> {
    self.build().map(SharedLruCache::from_cache)
  }
}
