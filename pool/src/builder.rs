use crate::error::BuildError;
use crate::runner::{Runner, RunnerShared};
use crate::TaskSpawner;

use core::fmt;
use std::sync::Arc;

const DEFAULT_NAME: &str = "runner";

/// A builder for creating [`Runner`] instances.
pub struct RunnerBuilder {
  max_concurrency: usize,
  spawner: Option<Arc<dyn TaskSpawner>>,
  name: Option<String>,
}

impl fmt::Debug for RunnerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RunnerBuilder")
      .field("max_concurrency", &self.max_concurrency)
      .field("has_spawner", &self.spawner.is_some())
      .field("name", &self.name)
      .finish()
  }
}

impl Default for RunnerBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl RunnerBuilder {
  /// Creates a builder with no limit set. `build` fails until
  /// [`max_concurrency`](Self::max_concurrency) is given a positive value.
  pub fn new() -> Self {
    Self {
      max_concurrency: 0,
      spawner: None,
      name: None,
    }
  }

  /// Sets how many work items may run at once.
  pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
    self.max_concurrency = max_concurrency;
    self
  }

  /// Sets the spawner that polls admitted work.
  ///
  /// With the default `tokio` feature the current runtime is used when no
  /// spawner is given.
  pub fn spawner(mut self, spawner: Arc<dyn TaskSpawner>) -> Self {
    self.spawner = Some(spawner);
    self
  }

  /// Names the runner in log events.
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn build(self) -> Result<Runner, BuildError> {
    if self.max_concurrency == 0 {
      return Err(BuildError::ZeroConcurrency);
    }

    let spawner = match self.spawner {
      Some(spawner) => spawner,
      None => default_spawner()?,
    };
    let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

    tracing::debug!(runner = %name, max_concurrency = self.max_concurrency, "runner built");
    Ok(Runner::from_shared(RunnerShared::new(
      name,
      self.max_concurrency,
      spawner,
    )))
  }
}

#[cfg(feature = "tokio")]
fn default_spawner() -> Result<Arc<dyn TaskSpawner>, BuildError> {
  match crate::runtime::TokioSpawner::try_current() {
    Some(spawner) => Ok(Arc::new(spawner)),
    None => Err(BuildError::SpawnerRequired),
  }
}

#[cfg(not(feature = "tokio"))]
fn default_spawner() -> Result<Arc<dyn TaskSpawner>, BuildError> {
  Err(BuildError::SpawnerRequired)
}
