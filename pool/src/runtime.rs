use std::{future::Future, pin::Pin};

/// A type-erased unit of work handed to a [`TaskSpawner`].
pub type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A trait for spawning a future onto an asynchronous runtime.
///
/// The runner only needs the future to be polled to completion. If the
/// spawner drops it instead, the work's slot is still released and the
/// caller's handle resolves with [`JoinError::Cancelled`](crate::JoinError).
/// A dropped task is taken to mean the executor has shut down (Tokio drops
/// every task when its runtime goes away), so the runner closes: work still
/// queued, and work submitted later, is never invoked and is cancelled too.
pub trait TaskSpawner: Send + Sync + 'static {
  /// Spawns a type-erased future.
  fn spawn(&self, future: BoxedTask);
}

#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioSpawner(tokio::runtime::Handle);

#[cfg(feature = "tokio")]
impl TokioSpawner {
  /// Creates a spawner bound to the given runtime.
  pub fn new(handle: tokio::runtime::Handle) -> Self {
    Self(handle)
  }

  /// Creates a spawner that uses the current Tokio runtime context, if any.
  pub fn try_current() -> Option<Self> {
    tokio::runtime::Handle::try_current().ok().map(Self)
  }
}

#[cfg(feature = "tokio")]
impl TaskSpawner for TokioSpawner {
  fn spawn(&self, future: BoxedTask) {
    self.0.spawn(future);
  }
}
