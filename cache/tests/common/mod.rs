#![allow(dead_code)]

use cinch_cache::LruCache;

// Naive reference: a Vec ordered from least to most recently used.
// Every operation is a linear scan, which keeps it obviously correct.
#[derive(Debug, Default)]
pub struct ModelLru {
  capacity: usize,
  entries: Vec<(u32, u32)>,
}

impl ModelLru {
  pub fn new(capacity: usize) -> Self {
    Self {
      capacity,
      entries: Vec::new(),
    }
  }

  pub fn get(&mut self, key: u32) -> Option<u32> {
    let pos = self.entries.iter().position(|(k, _)| *k == key)?;
    let entry = self.entries.remove(pos);
    self.entries.push(entry);
    Some(entry.1)
  }

  pub fn put(&mut self, key: u32, value: u32) {
    if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
      self.entries.remove(pos);
    } else if self.entries.len() == self.capacity {
      self.entries.remove(0);
    }
    self.entries.push((key, value));
  }

  pub fn delete(&mut self, key: u32) -> bool {
    match self.entries.iter().position(|(k, _)| *k == key) {
      Some(pos) => {
        self.entries.remove(pos);
        true
      }
      None => false,
    }
  }

  pub fn contains(&self, key: u32) -> bool {
    self.entries.iter().any(|(k, _)| *k == key)
  }

  pub fn snapshot(&self) -> Vec<(u32, u32)> {
    self.entries.clone()
  }
}

pub fn snapshot(cache: &LruCache<u32, u32>) -> Vec<(u32, u32)> {
  cache.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn build_test_cache(capacity: usize) -> LruCache<u32, u32> {
  LruCache::new(capacity).unwrap()
}
