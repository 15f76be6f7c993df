//! A bounded-concurrency runner for asynchronous work.
//!
//! [`Runner`] admits work up to a fixed number of slots. Anything submitted
//! while every slot is busy waits in a first-in, first-out queue and is
//! started as soon as a running item settles, whether it succeeded, returned
//! an error, or panicked. Each caller gets a [`TaskHandle`] resolving to the
//! output of exactly the work it submitted.
//!
//! Work is polled by a [`TaskSpawner`]. With the default `tokio` feature,
//! [`Runner::new`] picks up the current Tokio runtime.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use cinch_pool::Runner;
//!
//! let runner = Runner::new(2).unwrap();
//! let handles: Vec<_> = (0..5u32)
//!   .map(|i| runner.execute(move || async move { i * 2 }))
//!   .collect();
//!
//! assert_eq!(runner.running_count(), 2);
//! assert_eq!(runner.queued_count(), 3);
//!
//! let mut outputs = Vec::new();
//! for handle in handles {
//!   outputs.push(handle.await.unwrap());
//! }
//! assert_eq!(outputs, vec![0, 2, 4, 6, 8]);
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod runtime;

mod handle;
mod runner;

pub use builder::RunnerBuilder;
pub use error::{BuildError, JoinError};
pub use handle::TaskHandle;
pub use metrics::RunnerMetrics;
pub use runner::Runner;
pub use runtime::{BoxedTask, TaskSpawner};
#[cfg(feature = "tokio")]
pub use runtime::TokioSpawner;
