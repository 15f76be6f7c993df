/// Errors that can occur when building a cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
  /// The cache was configured with a capacity of zero. A bounded recency
  /// cache must be able to hold at least one entry.
  #[error("cache capacity must be a positive integer")]
  ZeroCapacity,
}
