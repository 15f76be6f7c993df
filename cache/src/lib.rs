//! A fixed-capacity cache with strict least-recently-used eviction.
//!
//! # Features
//! - **O(1) operations**: `get`, `put` and `delete` go through a hash index
//!   into an arena-backed doubly-linked recency list.
//! - **Strict ordering**: every hit and every put moves the key to the most
//!   recent position; the single least recent entry is evicted when a new
//!   key needs room.
//! - **Side-effect-free reads**: `contains_key`, `peek` and iteration never
//!   change the eviction order.
//! - **Eviction listener**: evicted entries are handed back by value.
//! - **Metrics**: hit/miss and eviction counters.
//!
//! Keys are compared by value (`Eq + Hash`). Wrap keys in a newtype that
//! hashes by address if identity semantics are needed.
//!
//! ```
//! use cinch_cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//! cache.put("c", 3);
//!
//! assert!(cache.contains_key("a"));
//! assert!(!cache.contains_key("b"));
//! ```

pub mod builder;
pub mod error;
pub mod iter;
pub mod listener;
pub mod metrics;

mod cache;
mod list;
mod shared;

pub use builder::CacheBuilder;
pub use cache::LruCache;
pub use error::BuildError;
pub use listener::{EvictionListener, EvictionReason};
pub use metrics::MetricsSnapshot;
pub use shared::SharedLruCache;
