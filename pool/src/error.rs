use std::any::Any;
use std::fmt;

/// Errors that can occur when building a runner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
  /// The runner was configured with a concurrency limit of zero, which would
  /// never admit any work.
  #[error("max concurrency must be a positive integer")]
  ZeroConcurrency,
  /// No `TaskSpawner` was configured and no Tokio runtime could be found
  /// (or the default `tokio` feature is disabled).
  #[error("a runner requires a task spawner or a running Tokio runtime with the 'tokio' feature")]
  SpawnerRequired,
}

/// The reason a [`TaskHandle`](crate::TaskHandle) resolved without the
/// work's output.
///
/// A work item that returns `Err(_)` is *not* a `JoinError`: its output is
/// delivered unchanged as `Ok(Err(_))`.
#[derive(thiserror::Error)]
pub enum JoinError {
  /// The work closure or the future it returned panicked. The payload is the
  /// value passed to `panic!`.
  #[error("task panicked")]
  Panicked(Box<dyn Any + Send + 'static>),
  /// The executor dropped the task before it settled.
  #[error("task was dropped by the executor before it settled")]
  Cancelled,
}

impl JoinError {
  pub fn is_panic(&self) -> bool {
    matches!(self, JoinError::Panicked(_))
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, JoinError::Cancelled)
  }

  /// Returns the panic payload, or gives the error back if the task was
  /// cancelled instead.
  pub fn try_into_panic(self) -> Result<Box<dyn Any + Send + 'static>, JoinError> {
    match self {
      JoinError::Panicked(payload) => Ok(payload),
      other => Err(other),
    }
  }

  /// The panic message, when the payload is a string.
  pub fn panic_message(&self) -> Option<&str> {
    match self {
      JoinError::Panicked(payload) => {
        let literal: Option<&str> = payload.downcast_ref::<&'static str>().copied();
        literal.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
      }
      JoinError::Cancelled => None,
    }
  }
}

impl fmt::Debug for JoinError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      JoinError::Panicked(_) => f
        .debug_tuple("Panicked")
        .field(&self.panic_message().unwrap_or("<non-string payload>"))
        .finish(),
      JoinError::Cancelled => f.write_str("Cancelled"),
    }
  }
}
