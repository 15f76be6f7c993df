//! Bounded-concurrency admission with a FIFO backlog.
//!
//! A `Runner` owns a fixed number of slots. Submitted work joins the back of
//! the pending queue and a single drainer moves the queue head into free
//! slots, one item at a time. Every settlement releases its slot through an
//! RAII guard and then asks for a drain. Whoever finds no drain in progress
//! becomes the drainer and loops until the slots are full or the queue is
//! empty; a release that happens while a drain is running (on another
//! thread, or nested inside a start on the same stack) only updates the
//! counters and leaves the starting to that drainer. Starts are therefore
//! serialized in pop order and never recurse.
//!
//! The state mutex is only held for bookkeeping. Work closures are invoked
//! and handed to the spawner with it unlocked.
//!
//! A task dropped by the spawner without settling means its executor is
//! gone. From then on the runner is closed: queued and later submissions are
//! dropped without being invoked and their handles resolve as cancelled.

use crate::builder::RunnerBuilder;
#[cfg(feature = "tokio")]
use crate::error::BuildError;
use crate::handle::TaskHandle;
use crate::metrics::RunnerMetrics;
use crate::runtime::{BoxedTask, TaskSpawner};

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use futures_channel::oneshot;
use futures_util::future::{self, FutureExt};
use parking_lot::{Mutex, MutexGuard};

// A deferred start: given the slot it will hold, produce the task to spawn.
type Job = Box<dyn FnOnce(Slot) -> BoxedTask + Send>;

struct RunnerState {
  running: usize,
  pending: VecDeque<Job>,
  draining: bool,
  closed: bool,
  submitted: u64,
  queued_total: u64,
  completed: u64,
  panicked: u64,
  cancelled: u64,
  peak_running: usize,
}

impl RunnerState {
  fn new() -> Self {
    Self {
      running: 0,
      pending: VecDeque::new(),
      draining: false,
      closed: false,
      submitted: 0,
      queued_total: 0,
      completed: 0,
      panicked: 0,
      cancelled: 0,
      peak_running: 0,
    }
  }

  fn occupy_slot(&mut self) {
    self.running += 1;
    self.peak_running = self.peak_running.max(self.running);
  }
}

pub(crate) struct RunnerShared {
  name: String,
  max_concurrency: usize,
  spawner: Arc<dyn TaskSpawner>,
  state: Mutex<RunnerState>,
}

impl RunnerShared {
  pub(crate) fn new(name: String, max_concurrency: usize, spawner: Arc<dyn TaskSpawner>) -> Self {
    Self {
      name,
      max_concurrency,
      spawner,
      state: Mutex::new(RunnerState::new()),
    }
  }

  // The caller must already have counted the slot in `running`.
  fn start(self: &Arc<Self>, job: Job) {
    let slot = Slot {
      shared: self.clone(),
      outcome: Outcome::Cancelled,
    };
    let task = job(slot);
    self.spawner.spawn(task);
  }

  // Moves queued work into free slots. Returns at once if another drain is
  // in progress; that drainer re-checks the state after each start.
  fn drain(self: &Arc<Self>, mut state: MutexGuard<'_, RunnerState>) {
    if state.draining {
      return;
    }
    state.draining = true;

    loop {
      if state.closed {
        let abandoned = mem::take(&mut state.pending);
        state.cancelled += abandoned.len() as u64;
        state.draining = false;
        drop(state);

        if !abandoned.is_empty() {
          tracing::debug!(
            runner = %self.name,
            dropped = abandoned.len(),
            "runner closed, dropping queued work"
          );
        }
        // Dropping a job drops its result sender, which cancels the handle.
        drop(abandoned);
        return;
      }

      if state.running >= self.max_concurrency {
        break;
      }
      let job = match state.pending.pop_front() {
        Some(job) => job,
        None => break,
      };
      state.occupy_slot();
      let (running, queued) = (state.running, state.pending.len());

      let started = MutexGuard::unlocked(&mut state, || {
        tracing::trace!(runner = %self.name, running, queued, "task started");
        panic::catch_unwind(AssertUnwindSafe(|| self.start(job)))
      });
      if let Err(payload) = started {
        // The spawner panicked. Hand the drainer role back before unwinding.
        state.draining = false;
        drop(state);
        panic::resume_unwind(payload);
      }
    }

    state.draining = false;
  }

  fn release(self: &Arc<Self>, outcome: Outcome) {
    let mut state = self.state.lock();
    state.running -= 1;
    match outcome {
      Outcome::Completed => state.completed += 1,
      Outcome::Panicked => state.panicked += 1,
      Outcome::Cancelled => {
        state.cancelled += 1;
        state.closed = true;
      }
    }

    tracing::trace!(
      runner = %self.name,
      ?outcome,
      running = state.running,
      queued = state.pending.len(),
      "slot released"
    );
    self.drain(state);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
  Completed,
  Panicked,
  Cancelled,
}

// Holds one running slot. Dropping it without `settle` means the executor
// discarded the task, which still frees the slot.
struct Slot {
  shared: Arc<RunnerShared>,
  outcome: Outcome,
}

impl Slot {
  fn settle(mut self, outcome: Outcome) {
    self.outcome = outcome;
  }
}

impl Drop for Slot {
  fn drop(&mut self) {
    self.shared.release(self.outcome);
  }
}

// Invokes `work` and wraps its future so that the slot is released before
// the outcome is delivered to the handle.
fn launch<F, Fut, T>(work: F, slot: Slot, tx: oneshot::Sender<thread::Result<T>>) -> BoxedTask
where
  F: FnOnce() -> Fut,
  Fut: Future<Output = T> + Send + 'static,
  T: Send + 'static,
{
  match panic::catch_unwind(AssertUnwindSafe(work)) {
    Ok(fut) => async move {
      let outcome = AssertUnwindSafe(fut).catch_unwind().await;
      slot.settle(if outcome.is_ok() {
        Outcome::Completed
      } else {
        Outcome::Panicked
      });
      let _ = tx.send(outcome);
    }
    .boxed(),
    Err(payload) => {
      slot.settle(Outcome::Panicked);
      let _ = tx.send(Err(payload));
      future::ready(()).boxed()
    }
  }
}

/// Runs asynchronous work with at most `max_concurrency` items in flight.
///
/// Work submitted while a slot is free starts immediately; the rest waits in
/// a FIFO queue and starts, oldest first, as running work settles. A failing
/// or panicking item only affects its own [`TaskHandle`]. There is no
/// cancellation: wrap the work yourself if it needs a deadline. Queued work
/// is only dropped once the executor has shut down (see [`TaskSpawner`]).
///
/// `Runner` is cheap to clone; clones share the same slots and queue.
#[derive(Clone)]
pub struct Runner {
  shared: Arc<RunnerShared>,
}

impl fmt::Debug for Runner {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.shared.state.lock();
    f.debug_struct("Runner")
      .field("name", &self.shared.name)
      .field("max_concurrency", &self.shared.max_concurrency)
      .field("running", &state.running)
      .field("queued", &state.pending.len())
      .finish()
  }
}

impl Runner {
  /// Creates a runner on the current Tokio runtime.
  ///
  /// Fails with [`BuildError::ZeroConcurrency`] if `max_concurrency` is zero
  /// and with [`BuildError::SpawnerRequired`] outside a runtime.
  #[cfg(feature = "tokio")]
  pub fn new(max_concurrency: usize) -> Result<Self, BuildError> {
    RunnerBuilder::new().max_concurrency(max_concurrency).build()
  }

  pub fn builder() -> RunnerBuilder {
    RunnerBuilder::new()
  }

  pub(crate) fn from_shared(shared: RunnerShared) -> Self {
    Self {
      shared: Arc::new(shared),
    }
  }

  /// Submits `work` and returns a handle to its eventual output.
  ///
  /// `work` is invoked exactly once, at the moment the item is admitted to
  /// a slot: before `execute` returns if a slot is free and nothing is
  /// waiting, otherwise by whichever settlement drains the queue up to it.
  /// Items are invoked in submission order.
  ///
  /// Once the runner is closed (its executor dropped a task), `work` is
  /// dropped without being invoked and the handle resolves with
  /// [`JoinError::Cancelled`](crate::JoinError::Cancelled).
  pub fn execute<F, Fut, T>(&self, work: F) -> TaskHandle<T>
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
  {
    let (tx, rx) = oneshot::channel();
    let job: Job = Box::new(move |slot| launch(work, slot, tx));

    let mut state = self.shared.state.lock();
    state.submitted += 1;
    // Waiters go first: a free slot is only taken directly if nobody queued.
    let waits = state.running >= self.shared.max_concurrency
      || !state.pending.is_empty()
      || state.draining;
    if waits && !state.closed {
      state.queued_total += 1;
      let queued = state.pending.len() + 1;
      tracing::debug!(runner = %self.shared.name, queued, "task queued");
    }
    state.pending.push_back(job);
    self.shared.drain(state);

    TaskHandle::new(rx)
  }

  /// Number of work items currently holding a slot.
  pub fn running_count(&self) -> usize {
    self.shared.state.lock().running
  }

  /// Number of work items waiting for a slot.
  pub fn queued_count(&self) -> usize {
    self.shared.state.lock().pending.len()
  }

  pub fn max_concurrency(&self) -> usize {
    self.shared.max_concurrency
  }

  /// `true` when every slot is taken.
  pub fn is_at_capacity(&self) -> bool {
    self.shared.state.lock().running == self.shared.max_concurrency
  }

  pub fn name(&self) -> &str {
    &self.shared.name
  }

  pub fn metrics(&self) -> RunnerMetrics {
    let state = self.shared.state.lock();
    RunnerMetrics {
      max_concurrency: self.shared.max_concurrency,
      running: state.running,
      queued: state.pending.len(),
      submitted: state.submitted,
      queued_total: state.queued_total,
      completed: state.completed,
      panicked: state.panicked,
      cancelled: state.cancelled,
      peak_running: state.peak_running,
    }
  }
}
