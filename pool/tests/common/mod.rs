#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
  Arc::new(Mutex::new(Vec::new()))
}

pub fn record(log: &EventLog, event: impl Into<String>) {
  log.lock().unwrap().push(event.into());
}

pub fn events(log: &EventLog) -> Vec<String> {
  log.lock().unwrap().clone()
}

// One latch per task: the task's future stays pending until the test
// releases it.
pub struct Gates {
  senders: Vec<Option<oneshot::Sender<()>>>,
}

impl Gates {
  pub fn new(count: usize) -> (Self, Vec<oneshot::Receiver<()>>) {
    let (senders, receivers) = (0..count)
      .map(|_| {
        let (tx, rx) = oneshot::channel();
        (Some(tx), rx)
      })
      .unzip();
    (Self { senders }, receivers)
  }

  pub fn open(&mut self, index: usize) {
    if let Some(tx) = self.senders[index].take() {
      let _ = tx.send(());
    }
  }
}
