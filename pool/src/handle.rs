use crate::error::JoinError;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use futures_channel::oneshot;

/// Resolves to the output of exactly one submitted work item.
///
/// The work's output passes through unchanged, so work returning
/// `Result<T, E>` yields `Ok(Err(e))` when it fails. Dropping the handle
/// does not cancel the work; it still runs and its slot is still released.
pub struct TaskHandle<T> {
  rx: oneshot::Receiver<thread::Result<T>>,
}

impl<T> TaskHandle<T> {
  pub(crate) fn new(rx: oneshot::Receiver<thread::Result<T>>) -> Self {
    Self { rx }
  }
}

impl<T> fmt::Debug for TaskHandle<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TaskHandle").finish_non_exhaustive()
  }
}

impl<T> Future for TaskHandle<T> {
  type Output = Result<T, JoinError>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match Pin::new(&mut self.rx).poll(cx) {
      Poll::Ready(Ok(Ok(output))) => Poll::Ready(Ok(output)),
      Poll::Ready(Ok(Err(payload))) => Poll::Ready(Err(JoinError::Panicked(payload))),
      // Sender dropped without a value: the task never settled.
      Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(JoinError::Cancelled)),
      Poll::Pending => Poll::Pending,
    }
  }
}
