use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use generational_arena::{Arena, Index};

#[derive(Debug)]
pub(crate) struct Node<K, V> {
  pub(crate) key: K,
  pub(crate) value: V,
  // Towards the tail (less recently used).
  pub(crate) next: Option<Index>,
  // Towards the head (more recently used).
  pub(crate) prev: Option<Index>,
}

// Arena-backed recency list. Nodes live contiguously in the arena and the
// lookup map resolves a key to its node in O(1).
#[derive(Debug)]
pub(crate) struct RecencyList<K, V, H> {
  pub(crate) nodes: Arena<Node<K, V>>,
  pub(crate) lookup: HashMap<K, Index, H>,
  // Head is the most-recently-used item.
  pub(crate) head: Option<Index>,
  // Tail is the least-recently-used item.
  pub(crate) tail: Option<Index>,
}

impl<K, V, H> RecencyList<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
    Self {
      nodes: Arena::with_capacity(capacity),
      lookup: HashMap::with_capacity_and_hasher(capacity, hasher),
      head: None,
      tail: None,
    }
  }

  // Detaches a node from its neighbours. Arena and map are left untouched.
  fn unlink(&mut self, index: Index) {
    let node = &self.nodes[index];
    let prev_node_idx = node.prev;
    let next_node_idx = node.next;

    if let Some(prev_idx) = prev_node_idx {
      self.nodes[prev_idx].next = next_node_idx;
    } else {
      self.head = next_node_idx;
    }

    if let Some(next_idx) = next_node_idx {
      self.nodes[next_idx].prev = prev_node_idx;
    } else {
      self.tail = prev_node_idx;
    }
  }

  // Links an already allocated node in as the new head.
  fn push_front_node(&mut self, index: Index) {
    let old_head_idx = self.head;
    self.nodes[index].next = old_head_idx;
    self.nodes[index].prev = None;
    self.head = Some(index);

    if let Some(old_head) = old_head_idx {
      self.nodes[old_head].prev = Some(index);
    }

    if self.tail.is_none() {
      self.tail = Some(index);
    }
  }

  pub fn len(&self) -> usize {
    self.lookup.len()
  }

  pub fn hasher(&self) -> &H {
    self.lookup.hasher()
  }

  pub fn contains<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.lookup.contains_key(key)
  }

  /// Reads a value without changing its position.
  pub fn peek<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = *self.lookup.get(key)?;
    self.nodes.get(index).map(|node| &node.value)
  }

  /// Moves the key to the head and returns its node index.
  pub fn touch<Q>(&mut self, key: &Q) -> Option<Index>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = *self.lookup.get(key)?;
    if self.head != Some(index) {
      self.unlink(index);
      self.push_front_node(index);
    }
    Some(index)
  }

  pub fn value(&self, index: Index) -> Option<&V> {
    self.nodes.get(index).map(|node| &node.value)
  }

  pub fn value_mut(&mut self, index: Index) -> Option<&mut V> {
    self.nodes.get_mut(index).map(|node| &mut node.value)
  }

  /// Inserts or updates `key` and makes it the head. Returns the node index
  /// and the replaced value for an existing key.
  pub fn push_front(&mut self, key: K, value: V) -> (Index, Option<V>) {
    if let Some(index) = self.touch(&key) {
      let node = &mut self.nodes[index];
      return (index, Some(std::mem::replace(&mut node.value, value)));
    }

    let index = self.nodes.insert(Node {
      key: key.clone(),
      value,
      next: None,
      prev: None,
    });
    self.lookup.insert(key, index);
    self.push_front_node(index);
    (index, None)
  }

  pub fn back(&self) -> Option<(&K, &V)> {
    let node = self.nodes.get(self.tail?)?;
    Some((&node.key, &node.value))
  }

  pub fn pop_back(&mut self) -> Option<(K, V)> {
    let tail_index = self.tail?;
    self.unlink(tail_index);
    let node = self.nodes.remove(tail_index)?;
    self.lookup.remove(&node.key);
    Some((node.key, node.value))
  }

  pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = self.lookup.remove(key)?;
    self.unlink(index);
    self.nodes.remove(index).map(|node| (node.key, node.value))
  }

  /// Empties the list, returning the entries from least to most recently used.
  pub fn drain(&mut self) -> Vec<(K, V)> {
    let mut drained = Vec::with_capacity(self.len());
    while let Some(entry) = self.pop_back() {
      drained.push(entry);
    }
    self.clear();
    drained
  }

  pub fn clear(&mut self) {
    self.nodes.clear();
    self.lookup.clear();
    self.head = None;
    self.tail = None;
  }

  // Keys from tail (LRU) to head (MRU).
  #[cfg(test)]
  pub(crate) fn keys_as_vec(&self) -> Vec<K> {
    let mut keys = Vec::new();
    let mut current = self.tail;
    while let Some(index) = current {
      keys.push(self.nodes[index].key.clone());
      current = self.nodes[index].prev;
    }
    keys
  }
}
