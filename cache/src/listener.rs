use std::fmt;

/// Describes the reason an entry left the cache without being handed back
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
  /// The entry was the least recently used one when a new key needed room.
  Capacity,
  /// The entry was removed with `delete`.
  Invalidated,
  /// The entry was dropped by `clear`.
  Cleared,
}

impl fmt::Display for EvictionReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvictionReason::Capacity => write!(f, "evicted due to capacity"),
      EvictionReason::Invalidated => write!(f, "manually invalidated"),
      EvictionReason::Cleared => write!(f, "dropped by clear"),
    }
  }
}

/// A listener that can be registered with the cache to receive ownership of
/// entries as they are evicted.
///
/// `on_evict` runs inline, on the thread that performed the mutating call,
/// while that call still holds exclusive access to the cache. Keep it short.
/// For a cache built with `build_shared` that access is the cache's mutex,
/// so a listener that touches the same `SharedLruCache` deadlocks; hand the
/// entry off (for example over a channel) instead.
pub trait EvictionListener<K, V>: Send + Sync {
  fn on_evict(&self, key: K, value: V, reason: EvictionReason);
}

impl<K, V, F> EvictionListener<K, V> for F
where
  F: Fn(K, V, EvictionReason) + Send + Sync,
{
  fn on_evict(&self, key: K, value: V, reason: EvictionReason) {
    self(key, value, reason)
  }
}
