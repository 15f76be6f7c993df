mod common;

use cinch_pool::Runner;
use common::{event_log, events, record, Gates};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_limit_one_runs_strictly_in_order() {
  let runner = Runner::new(1).unwrap();
  let log = event_log();

  let handles: Vec<_> = (1..=3)
    .map(|i| {
      let log = log.clone();
      runner.execute(move || {
        record(&log, format!("start {i}"));
        async move {
          tokio::time::sleep(Duration::from_millis(10)).await;
          record(&log, format!("end {i}"));
        }
      })
    })
    .collect();

  for handle in handles {
    handle.await.unwrap();
  }

  assert_eq!(
    events(&log),
    vec!["start 1", "end 1", "start 2", "end 2", "start 3", "end 3"]
  );
}

#[tokio::test]
async fn test_queued_work_starts_oldest_first() {
  let runner = Runner::new(2).unwrap();
  let log = event_log();
  let (mut gates, receivers) = Gates::new(6);

  let mut handles = Vec::new();
  for (i, rx) in receivers.into_iter().enumerate() {
    let log = log.clone();
    handles.push(runner.execute(move || {
      record(&log, format!("start {i}"));
      async move {
        let _ = rx.await;
      }
    }));
  }
  assert_eq!(events(&log), vec!["start 0", "start 1"]);

  // Free the slots out of order; queued work still starts 2, 3, 4, 5.
  gates.open(1);
  let mut handles: Vec<_> = handles.into_iter().map(Some).collect();
  handles[1].take().unwrap().await.unwrap();
  assert_eq!(events(&log).last().map(String::as_str), Some("start 2"));

  gates.open(0);
  handles[0].take().unwrap().await.unwrap();
  assert_eq!(events(&log).last().map(String::as_str), Some("start 3"));

  for i in 2..6 {
    gates.open(i);
  }
  for handle in handles.into_iter().flatten() {
    handle.await.unwrap();
  }

  assert_eq!(
    events(&log),
    vec!["start 0", "start 1", "start 2", "start 3", "start 4", "start 5"]
  );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_start_order_matches_submission_across_worker_threads() {
  const JOBS: usize = 2_000;
  let runner = Runner::new(3).unwrap();
  let started = Arc::new(Mutex::new(Vec::with_capacity(JOBS)));

  let handles: Vec<_> = (0..JOBS)
    .map(|i| {
      let started = started.clone();
      runner.execute(move || {
        started.lock().unwrap().push(i);
        async move {
          // Settle on whichever worker picks the task up next.
          tokio::task::yield_now().await;
          i
        }
      })
    })
    .collect();

  for (i, handle) in handles.into_iter().enumerate() {
    assert_eq!(handle.await.unwrap(), i);
  }

  let started = started.lock().unwrap().clone();
  assert_eq!(started, (0..JOBS).collect::<Vec<_>>());
  assert!(runner.metrics().peak_running <= 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submitters_start_in_admission_order() {
  let runner = Runner::new(2).unwrap();
  let started = Arc::new(Mutex::new(Vec::new()));
  let admitted = Arc::new(Mutex::new(Vec::new()));

  let mut submitters = Vec::new();
  for t in 0..4u32 {
    let runner = runner.clone();
    let started = started.clone();
    let admitted = admitted.clone();
    submitters.push(tokio::spawn(async move {
      let mut handles = Vec::new();
      for i in 0..200u32 {
        let id = t * 1_000 + i;
        let started = started.clone();
        // Record the submission under the same lock that orders the queue.
        let mut admitted_ids = admitted.lock().unwrap();
        handles.push(runner.execute(move || {
          started.lock().unwrap().push(id);
          async move { tokio::task::yield_now().await }
        }));
        admitted_ids.push(id);
      }
      for handle in handles {
        handle.await.unwrap();
      }
    }));
  }
  for submitter in submitters {
    submitter.await.unwrap();
  }

  assert_eq!(*started.lock().unwrap(), *admitted.lock().unwrap());
  assert_eq!(runner.metrics().completed, 800);
}
