use std::fmt;
use std::time::Instant;

/// Counters owned by a single cache instance. Updated through `&mut self`,
/// so no atomics are needed.
#[derive(Debug, Clone)]
pub(crate) struct Metrics {
  pub(crate) hits: u64,
  pub(crate) misses: u64,
  pub(crate) inserts: u64,
  pub(crate) updates: u64,
  pub(crate) invalidations: u64,
  pub(crate) evicted_by_capacity: u64,
  created_at: Instant,
}

impl Default for Metrics {
  fn default() -> Self {
    Self {
      hits: 0,
      misses: 0,
      inserts: 0,
      updates: 0,
      invalidations: 0,
      evicted_by_capacity: 0,
      created_at: Instant::now(),
    }
  }
}

impl Metrics {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Creates a point-in-time snapshot of the counters.
  pub(crate) fn snapshot(&self, len: usize, capacity: usize) -> MetricsSnapshot {
    let total_lookups = self.hits + self.misses;

    MetricsSnapshot {
      hits: self.hits,
      misses: self.misses,
      hit_ratio: if total_lookups == 0 {
        0.0
      } else {
        self.hits as f64 / total_lookups as f64
      },
      inserts: self.inserts,
      updates: self.updates,
      invalidations: self.invalidations,
      evicted_by_capacity: self.evicted_by_capacity,
      len,
      capacity,
      uptime_secs: self.created_at.elapsed().as_secs(),
    }
  }
}

/// A point-in-time, public-facing snapshot of the cache's metrics.
#[derive(Clone)]
pub struct MetricsSnapshot {
  /// Lookups through `get`, `get_mut` or `get_or_insert_with` that found the key.
  pub hits: u64,
  /// Lookups that did not find the key.
  pub misses: u64,
  /// The cache hit ratio (hits / (hits + misses)).
  pub hit_ratio: f64,
  /// New keys added to the cache.
  pub inserts: u64,
  /// Puts that replaced the value of an existing key.
  pub updates: u64,
  /// Entries removed by `delete`, `remove` or `clear`.
  pub invalidations: u64,
  /// Entries evicted to make room for a new key.
  pub evicted_by_capacity: u64,
  /// Live entries at snapshot time.
  pub len: usize,
  /// The fixed capacity of the cache.
  pub capacity: usize,
  /// Seconds since the cache was built.
  pub uptime_secs: u64,
}

impl fmt::Debug for MetricsSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MetricsSnapshot")
      .field("hits", &self.hits)
      .field("misses", &self.misses)
      .field("hit_ratio", &format!("{:.2}%", self.hit_ratio * 100.0))
      .field("inserts", &self.inserts)
      .field("updates", &self.updates)
      .field("invalidations", &self.invalidations)
      .field("evicted_by_capacity", &self.evicted_by_capacity)
      .field("len", &self.len)
      .field("capacity", &self.capacity)
      .field("uptime_secs", &self.uptime_secs)
      .finish()
  }
}
