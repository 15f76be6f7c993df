use cinch_cache::{CacheBuilder, EvictionReason};

fn main() {
  // A cache of three entries that reports every eviction.
  let mut cache = CacheBuilder::default()
    .capacity(3)
    .eviction_listener(|key: String, value: u32, reason: EvictionReason| {
      println!("  -> {key}={value} left the cache ({reason})");
    })
    .build()
    .expect("Failed to build cache");

  for (name, score) in [("ada", 36), ("grace", 85), ("linus", 54)] {
    cache.put(name.to_string(), score);
  }
  println!("Filled: {:?}", cache.keys().collect::<Vec<_>>());

  // Reading "ada" makes it the most recently used entry.
  println!("ada = {:?}", cache.get("ada"));

  // "grace" is now the least recently used, so it is evicted.
  println!("Inserting ken...");
  cache.put("ken".to_string(), 71);
  println!("After insert: {:?}", cache.keys().collect::<Vec<_>>());

  // `contains_key` and `peek` never change the order.
  println!("contains linus? {}", cache.contains_key("linus"));
  println!("peek linus = {:?}", cache.peek("linus"));

  cache.delete("ken");
  println!("\nCache metrics: {:#?}", cache.metrics());
}
