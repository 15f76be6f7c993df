//! Borrowing iterators over an [`LruCache`](crate::LruCache).
//!
//! Every iterator walks from the least recently used entry to the most
//! recently used one, and can be reversed. Creating or advancing one never
//! changes the eviction order.

use crate::list::RecencyList;

use generational_arena::Index;
use std::iter::FusedIterator;

/// An iterator over `(&K, &V)` pairs, least recently used first.
pub struct Iter<'a, K, V, H> {
  list: &'a RecencyList<K, V, H>,
  // Next node from the LRU end.
  front: Option<Index>,
  // Next node from the MRU end.
  back: Option<Index>,
  remaining: usize,
}

impl<'a, K, V, H> Iter<'a, K, V, H> {
  pub(crate) fn new(list: &'a RecencyList<K, V, H>) -> Self {
    Self {
      list,
      front: list.tail,
      back: list.head,
      remaining: list.lookup.len(),
    }
  }
}

impl<K, V, H> Clone for Iter<'_, K, V, H> {
  fn clone(&self) -> Self {
    Self {
      list: self.list,
      front: self.front,
      back: self.back,
      remaining: self.remaining,
    }
  }
}

impl<'a, K, V, H> Iterator for Iter<'a, K, V, H> {
  type Item = (&'a K, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    let node = self.list.nodes.get(self.front?)?;
    self.front = node.prev;
    self.remaining -= 1;
    Some((&node.key, &node.value))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<K, V, H> DoubleEndedIterator for Iter<'_, K, V, H> {
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    let node = self.list.nodes.get(self.back?)?;
    self.back = node.next;
    self.remaining -= 1;
    Some((&node.key, &node.value))
  }
}

impl<K, V, H> ExactSizeIterator for Iter<'_, K, V, H> {}
impl<K, V, H> FusedIterator for Iter<'_, K, V, H> {}

/// An iterator over keys, least recently used first.
pub struct Keys<'a, K, V, H> {
  pub(crate) inner: Iter<'a, K, V, H>,
}

impl<'a, K, V, H> Iterator for Keys<'a, K, V, H> {
  type Item = &'a K;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, _)| k)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V, H> DoubleEndedIterator for Keys<'_, K, V, H> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, _)| k)
  }
}

impl<K, V, H> ExactSizeIterator for Keys<'_, K, V, H> {}
impl<K, V, H> FusedIterator for Keys<'_, K, V, H> {}

/// An iterator over values, least recently used first.
pub struct Values<'a, K, V, H> {
  pub(crate) inner: Iter<'a, K, V, H>,
}

impl<'a, K, V, H> Iterator for Values<'a, K, V, H> {
  type Item = &'a V;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(_, v)| v)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V, H> DoubleEndedIterator for Values<'_, K, V, H> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(_, v)| v)
  }
}

impl<K, V, H> ExactSizeIterator for Values<'_, K, V, H> {}
impl<K, V, H> FusedIterator for Values<'_, K, V, H> {}

#[cfg(test)]
mod tests {
  use crate::LruCache;

  fn filled() -> LruCache<i32, char> {
    let mut cache = LruCache::new(4).unwrap();
    cache.put(1, 'a');
    cache.put(2, 'b');
    cache.put(3, 'c');
    cache.get(&1);
    cache
  }

  #[test]
  fn iterates_lru_to_mru() {
    let cache = filled();
    let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![(2, 'b'), (3, 'c'), (1, 'a')]);
  }

  #[test]
  fn reverse_iterates_mru_to_lru() {
    let cache = filled();
    let keys: Vec<_> = cache.keys().rev().copied().collect();
    assert_eq!(keys, vec![1, 3, 2]);
  }

  #[test]
  fn mixed_ends_meet_without_overlap() {
    let cache = filled();
    let mut iter = cache.values();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(&'b'));
    assert_eq!(iter.next_back(), Some(&'a'));
    assert_eq!(iter.next(), Some(&'c'));
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
  }

  #[test]
  fn iteration_is_restartable_and_side_effect_free() {
    let mut cache = filled();
    let first: Vec<_> = cache.keys().copied().collect();
    let second: Vec<_> = (&cache).into_iter().map(|(k, _)| *k).collect();
    assert_eq!(first, second);

    // Iterating must not have promoted anything: 2 is still evicted next.
    cache.put(4, 'd');
    cache.put(5, 'e');
    assert!(!cache.contains_key(&2));
  }
}
