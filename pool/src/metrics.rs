/// A point-in-time snapshot of a runner's bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerMetrics {
  /// The fixed concurrency limit.
  pub max_concurrency: usize,
  /// Work items holding a slot at snapshot time.
  pub running: usize,
  /// Work items waiting for a slot at snapshot time.
  pub queued: usize,
  /// Total calls to `execute`.
  pub submitted: u64,
  /// Submissions that had to wait in the queue before starting.
  pub queued_total: u64,
  /// Work items whose future ran to completion, whatever their output.
  pub completed: u64,
  /// Work items whose closure or future panicked.
  pub panicked: u64,
  /// Work items dropped by the executor before settling.
  pub cancelled: u64,
  /// Highest number of simultaneously running items seen so far.
  pub peak_running: usize,
}

impl RunnerMetrics {
  /// Work items that have released their slot, by any outcome.
  pub fn settled(&self) -> u64 {
    self.completed + self.panicked + self.cancelled
  }
}
