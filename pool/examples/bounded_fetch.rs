use cinch_pool::Runner;
use std::time::{Duration, Instant};

// Pretend to fetch a resource; ids divisible by 5 fail.
async fn fetch(id: u32) -> Result<String, String> {
  tokio::time::sleep(Duration::from_millis(100)).await;
  if id % 5 == 0 {
    Err(format!("resource {id}: 503 Service Unavailable"))
  } else {
    Ok(format!("resource {id}: 200 OK"))
  }
}

#[tokio::main]
async fn main() {
  // At most three fetches in flight at any time.
  let runner = Runner::builder()
    .max_concurrency(3)
    .name("fetcher")
    .build()
    .expect("Failed to build runner");

  let started = Instant::now();
  let handles: Vec<_> = (1..=10).map(|id| runner.execute(move || fetch(id))).collect();
  println!(
    "Submitted 10 fetches: {} running, {} queued",
    runner.running_count(),
    runner.queued_count()
  );

  for handle in handles {
    match handle.await {
      Ok(Ok(body)) => println!("  ok   {body}"),
      Ok(Err(err)) => println!("  fail {err}"),
      Err(join_err) => println!("  task did not settle: {join_err}"),
    }
  }

  // Four waves of 100ms each with a limit of three.
  println!("\nElapsed: {:?}", started.elapsed());
  println!("Runner metrics: {:#?}", runner.metrics());
}
