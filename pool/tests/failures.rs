mod common;

use cinch_pool::Runner;
use common::{event_log, events, record};

#[derive(Debug, PartialEq, Eq)]
struct RequestFailed(u16);

#[tokio::test]
async fn test_failing_task_frees_its_slot() {
  let runner = Runner::new(1).unwrap();
  let log = event_log();

  let failing = {
    let log = log.clone();
    runner.execute(move || async move {
      record(&log, "t1");
      Err::<u32, _>(RequestFailed(503))
    })
  };
  let succeeding = {
    let log = log.clone();
    runner.execute(move || async move {
      record(&log, "t2");
      Ok::<_, RequestFailed>(200)
    })
  };

  // The error passes through unchanged, inside the handle's Ok.
  assert_eq!(failing.await.unwrap(), Err(RequestFailed(503)));
  assert_eq!(succeeding.await.unwrap(), Ok(200));
  assert_eq!(events(&log), vec!["t1", "t2"]);
  assert_eq!(runner.running_count(), 0);
}

#[tokio::test]
async fn test_panicking_task_is_isolated() {
  let runner = Runner::new(1).unwrap();

  let exploding = runner.execute(|| async {
    if true {
      panic!("task blew up");
    }
    0u8
  });
  let survivor = runner.execute(|| async { 7u8 });

  let err = exploding.await.unwrap_err();
  assert!(err.is_panic());
  assert_eq!(err.panic_message(), Some("task blew up"));
  assert_eq!(survivor.await.unwrap(), 7);

  let metrics = runner.metrics();
  assert_eq!(metrics.panicked, 1);
  assert_eq!(metrics.completed, 1);
  assert_eq!(metrics.settled(), 2);
}

#[tokio::test]
async fn test_many_failures_do_not_leak_slots() {
  let runner = Runner::new(3).unwrap();
  let handles: Vec<_> = (0..30u32)
    .map(|i| {
      runner.execute(move || async move {
        tokio::task::yield_now().await;
        if i % 2 == 0 {
          Err(format!("even {i}"))
        } else {
          Ok(i)
        }
      })
    })
    .collect();

  let mut failures = 0;
  for handle in handles {
    if handle.await.unwrap().is_err() {
      failures += 1;
    }
  }

  assert_eq!(failures, 15);
  assert_eq!(runner.running_count(), 0);
  assert_eq!(runner.queued_count(), 0);
  assert_eq!(runner.metrics().completed, 30);
}
