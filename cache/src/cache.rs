use crate::builder::CacheBuilder;
use crate::error::BuildError;
use crate::iter::{Iter, Keys, Values};
use crate::list::RecencyList;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::{EvictionListener, EvictionReason};

use generational_arena::Index;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A fixed-capacity cache that evicts the least recently used entry when a
/// new key would exceed its capacity.
///
/// `get`, `get_mut` and `put` mark an entry as most recently used. `peek`,
/// `contains_key` and iteration never change the eviction order. Iteration
/// yields entries from least to most recently used.
///
/// The cache is a single-owner structure. Wrap it in a
/// [`SharedLruCache`](crate::SharedLruCache) to share it between threads.
pub struct LruCache<K, V, H = ahash::RandomState> {
  capacity: usize,
  pub(crate) list: RecencyList<K, V, H>,
  metrics: Metrics,
  listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V, H> fmt::Debug for LruCache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LruCache")
      .field("capacity", &self.capacity)
      .field("len", &self.list.lookup.len())
      .field("has_listener", &self.listener.is_some())
      .finish_non_exhaustive()
  }
}

impl<K, V> LruCache<K, V>
where
  K: Eq + Hash + Clone,
{
  /// Creates a cache holding at most `capacity` entries.
  ///
  /// Fails with [`BuildError::ZeroCapacity`] if `capacity` is zero.
  pub fn new(capacity: usize) -> Result<Self, BuildError> {
    CacheBuilder::new().capacity(capacity).build()
  }

  /// Returns a builder for configuring hasher and listener.
  pub fn builder() -> CacheBuilder<K, V> {
    CacheBuilder::new()
  }
}

impl<K, V, H> LruCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub(crate) fn from_parts(
    capacity: usize,
    hasher: H,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
  ) -> Self {
    Self {
      capacity,
      list: RecencyList::with_capacity_and_hasher(capacity, hasher),
      metrics: Metrics::new(),
      listener,
    }
  }

  /// Returns the value for `key` and marks it as most recently used.
  pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match self.list.touch(key) {
      Some(index) => {
        self.metrics.hits += 1;
        self.list.value(index)
      }
      None => {
        self.metrics.misses += 1;
        None
      }
    }
  }

  /// Like [`get`](Self::get), but returns a mutable reference.
  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match self.list.touch(key) {
      Some(index) => {
        self.metrics.hits += 1;
        self.list.value_mut(index)
      }
      None => {
        self.metrics.misses += 1;
        None
      }
    }
  }

  /// Returns the value for `key` without touching its recency.
  pub fn peek<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.list.peek(key)
  }

  /// Inserts or updates `key`, making it the most recently used entry.
  ///
  /// Returns the previous value if the key was already present. If the key
  /// is new and the cache is full, the least recently used entry is evicted
  /// first and handed to the eviction listener.
  pub fn put(&mut self, key: K, value: V) -> Option<V> {
    self.put_front(key, value).1
  }

  /// Returns the value for `key`, inserting `f()` first on a miss.
  pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
  where
    F: FnOnce() -> V,
  {
    let index = match self.list.touch(&key) {
      Some(index) => {
        self.metrics.hits += 1;
        index
      }
      None => {
        self.metrics.misses += 1;
        self.put_front(key, f()).0
      }
    };
    &self.list.nodes[index].value
  }

  /// Returns `true` if the cache holds `key`. Does not affect recency.
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.list.contains(key)
  }

  /// Removes `key`, passing the entry to the eviction listener.
  /// Returns whether anything was removed.
  pub fn delete<Q>(&mut self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match self.list.remove(key) {
      Some((key, value)) => {
        self.metrics.invalidations += 1;
        self.notify(key, value, EvictionReason::Invalidated);
        true
      }
      None => false,
    }
  }

  /// Removes `key` and returns its value to the caller.
  pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let (_, value) = self.list.remove(key)?;
    self.metrics.invalidations += 1;
    Some(value)
  }

  /// The entry that would be evicted next.
  pub fn peek_lru(&self) -> Option<(&K, &V)> {
    self.list.back()
  }

  /// Removes and returns the least recently used entry. Like `remove`, it
  /// counts as an invalidation and bypasses the eviction listener.
  pub fn pop_lru(&mut self) -> Option<(K, V)> {
    let entry = self.list.pop_back()?;
    self.metrics.invalidations += 1;
    Some(entry)
  }

  /// Drops every entry. Each one is passed to the eviction listener, oldest
  /// first.
  pub fn clear(&mut self) {
    if self.list.len() == 0 {
      return;
    }
    self.metrics.invalidations += self.list.len() as u64;
    match self.listener.as_ref() {
      Some(listener) => {
        for (key, value) in self.list.drain() {
          listener.on_evict(key, value, EvictionReason::Cleared);
        }
      }
      None => self.list.clear(),
    }
  }

  pub fn len(&self) -> usize {
    self.list.len()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn is_empty(&self) -> bool {
    self.list.len() == 0
  }

  pub fn is_full(&self) -> bool {
    self.list.len() == self.capacity
  }

  pub fn hasher(&self) -> &H {
    self.list.hasher()
  }

  /// Iterates over entries from least to most recently used.
  pub fn iter(&self) -> Iter<'_, K, V, H> {
    Iter::new(&self.list)
  }

  /// Iterates over keys from least to most recently used.
  pub fn keys(&self) -> Keys<'_, K, V, H> {
    Keys { inner: self.iter() }
  }

  /// Iterates over values from least to most recently used.
  pub fn values(&self) -> Values<'_, K, V, H> {
    Values { inner: self.iter() }
  }

  pub fn metrics(&self) -> MetricsSnapshot {
    self.metrics.snapshot(self.list.len(), self.capacity)
  }

  fn put_front(&mut self, key: K, value: V) -> (Index, Option<V>) {
    if self.list.contains(&key) {
      self.metrics.updates += 1;
      return self.list.push_front(key, value);
    }

    if self.list.len() >= self.capacity {
      self.evict_lru();
    }
    self.metrics.inserts += 1;
    self.list.push_front(key, value)
  }

  fn evict_lru(&mut self) {
    if let Some((key, value)) = self.list.pop_back() {
      self.metrics.evicted_by_capacity += 1;
      tracing::trace!(capacity = self.capacity, "evicting least recently used entry");
      self.notify(key, value, EvictionReason::Capacity);
    }
  }

  fn notify(&self, key: K, value: V, reason: EvictionReason) {
    if let Some(listener) = self.listener.as_ref() {
      listener.on_evict(key, value, reason);
    }
  }
}

impl<'a, K, V, H> IntoIterator for &'a LruCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  type Item = (&'a K, &'a V);
  type IntoIter = Iter<'a, K, V, H>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
