mod common;

use cinch_cache::{BuildError, LruCache};
use common::build_test_cache;

#[test]
fn test_zero_capacity_fails_construction() {
  assert_eq!(
    LruCache::<String, String>::new(0).unwrap_err(),
    BuildError::ZeroCapacity
  );
}

#[test]
fn test_size_equals_distinct_keys_under_capacity() {
  let mut cache = build_test_cache(10);
  let keys = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
  for (i, key) in keys.iter().enumerate() {
    cache.put(*key, i as u32);
  }
  // Distinct: 3, 1, 4, 5, 9, 2, 6
  assert_eq!(cache.len(), 7);
}

#[test]
fn test_third_put_evicts_first_key() {
  let mut cache = build_test_cache(2);
  cache.put(1, 10);
  cache.put(2, 20);
  cache.put(3, 30);

  assert!(!cache.contains_key(&1));
  assert!(cache.contains_key(&2));
  assert!(cache.contains_key(&3));
}

#[test]
fn test_get_protects_entry_from_eviction() {
  let mut cache = build_test_cache(3);
  cache.put(1, 10);
  cache.put(2, 20);
  cache.put(3, 30);
  cache.get(&1);
  cache.put(4, 40);

  assert!(cache.contains_key(&1), "recently read key must survive");
  assert!(!cache.contains_key(&2), "oldest untouched key is evicted");
}

#[test]
fn test_contains_key_does_not_protect_entry() {
  let mut cache = build_test_cache(2);
  cache.put(1, 10);
  cache.put(2, 20);
  assert!(cache.contains_key(&1));
  cache.put(3, 30);

  assert!(!cache.contains_key(&1));
}

#[test]
fn test_repeated_put_is_idempotent() {
  let mut cache = build_test_cache(4);
  cache.put(7, 70);
  let size = cache.len();
  cache.put(7, 70);

  assert_eq!(cache.len(), size);
  assert_eq!(cache.get(&7), Some(&70));
}

#[test]
fn test_clear_resets_any_state() {
  let mut cache = build_test_cache(3);
  for i in 0..10 {
    cache.put(i, i);
    cache.get(&(i / 2));
  }
  cache.clear();

  assert!(cache.is_empty());
  assert_eq!(cache.len(), 0);
  assert!(!cache.is_full());
  assert_eq!(cache.capacity(), 3);
}

#[test]
fn test_size_never_exceeds_capacity() {
  let mut cache = build_test_cache(5);
  for i in 0..100 {
    cache.put(i % 13, i);
    assert!(cache.len() <= cache.capacity());
  }
  assert!(cache.is_full());
}

#[test]
fn test_string_keys_borrow_as_str() {
  let mut cache: LruCache<String, usize> = LruCache::new(2).unwrap();
  cache.put("alpha".to_string(), 1);
  cache.put("beta".to_string(), 2);

  assert_eq!(cache.get("alpha"), Some(&1));
  cache.put("gamma".to_string(), 3);
  assert!(!cache.contains_key("beta"));
  assert_eq!(cache.remove("gamma"), Some(3));
}
