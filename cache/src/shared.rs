use crate::cache::LruCache;
use crate::metrics::MetricsSnapshot;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use parking_lot::Mutex;

/// A clonable handle to an [`LruCache`] guarded by a mutex.
///
/// Every method takes the lock for the duration of one cache operation, so
/// each call is atomic with respect to the others. Use
/// [`with_lock`](Self::with_lock) when several operations must happen as
/// one step.
///
/// The eviction listener is called with the lock held. A listener that calls
/// back into the same cache deadlocks, since `parking_lot::Mutex` is not
/// re-entrant; forward the evicted entry and act on it after the call returns.
pub struct SharedLruCache<K, V, H = ahash::RandomState> {
  inner: Arc<Mutex<LruCache<K, V, H>>>,
}

impl<K, V, H> Clone for SharedLruCache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<K, V, H> fmt::Debug for SharedLruCache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cache = self.inner.lock();
    f.debug_struct("SharedLruCache")
      .field("cache", &*cache)
      .finish()
  }
}

impl<K, V, H> SharedLruCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub fn from_cache(cache: LruCache<K, V, H>) -> Self {
    Self {
      inner: Arc::new(Mutex::new(cache)),
    }
  }

  /// Returns a clone of the value and marks the key as most recently used.
  pub fn get<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    V: Clone,
  {
    self.inner.lock().get(key).cloned()
  }

  pub fn put(&self, key: K, value: V) -> Option<V> {
    self.inner.lock().put(key, value)
  }

  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.inner.lock().contains_key(key)
  }

  pub fn delete<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.inner.lock().delete(key)
  }

  pub fn remove<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.inner.lock().remove(key)
  }

  pub fn clear(&self) {
    self.inner.lock().clear()
  }

  pub fn len(&self) -> usize {
    self.inner.lock().len()
  }

  pub fn capacity(&self) -> usize {
    self.inner.lock().capacity()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.inner.lock().is_full()
  }

  pub fn metrics(&self) -> MetricsSnapshot {
    self.inner.lock().metrics()
  }

  /// Runs `f` with exclusive access to the underlying cache.
  pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V, H>) -> R) -> R {
    let mut cache = self.inner.lock();
    f(&mut cache)
  }
}
