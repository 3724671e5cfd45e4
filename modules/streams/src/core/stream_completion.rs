use alloc::{sync::Arc, vec::Vec};
use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll, Waker},
};

use spin::Mutex;

use super::{CancelHandle, Completion, StreamError};

#[cfg(test)]
mod tests;

struct CompletionState<T> {
  result: Option<Result<T, StreamError>>,
  wakers: Vec<Waker>,
}

impl<T> CompletionState<T> {
  const fn new() -> Self {
    Self { result: None, wakers: Vec::new() }
  }
}

/// Asynchronous result of a materialized stage.
///
/// Every clone observes the same result. The first resolution wins; later ones are ignored.
/// Awaiting the completion yields a clone of the result.
pub struct StreamCompletion<T> {
  inner:     Arc<Mutex<CompletionState<T>>>,
  canceller: Option<CancelHandle>,
}

impl<T> Clone for StreamCompletion<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone(), canceller: self.canceller.clone() }
  }
}

impl<T> StreamCompletion<T> {
  /// Creates a new, unresolved completion handle.
  #[must_use]
  pub fn new() -> Self {
    Self { inner: Arc::new(Mutex::new(CompletionState::new())), canceller: None }
  }

  /// Binds the completion to the boundary port cancelled by [`Self::cancel`].
  #[must_use]
  pub fn with_canceller(mut self, canceller: CancelHandle) -> Self {
    self.canceller = Some(canceller);
    self
  }

  /// Polls the completion state.
  #[must_use]
  pub fn poll(&self) -> Completion<T>
  where
    T: Clone, {
    let guard = self.inner.lock();
    match guard.result.clone() {
      | Some(result) => Completion::Ready(result),
      | None => Completion::Pending,
    }
  }

  /// Returns `true` once a result has been recorded.
  #[must_use]
  pub fn is_ready(&self) -> bool {
    self.inner.lock().result.is_some()
  }

  /// Attempts to take the completion result.
  #[must_use]
  pub fn try_take(&self) -> Option<Result<T, StreamError>> {
    let mut guard = self.inner.lock();
    guard.result.take()
  }

  /// Cancels the stage that produced this completion.
  ///
  /// The stage cancels its inlets, which propagates upstream. Returns `false` when the completion
  /// is not bound to a stage or the stage already terminated.
  pub fn cancel(&self) -> bool {
    match &self.canceller {
      | Some(canceller) => canceller.cancel(),
      | None => false,
    }
  }

  /// Resolves the completion.
  ///
  /// Returns `false` when a result was already recorded; the earlier result is kept.
  pub fn complete(&self, result: Result<T, StreamError>) -> bool {
    let wakers = {
      let mut guard = self.inner.lock();
      if guard.result.is_some() {
        return false;
      }
      guard.result = Some(result);
      core::mem::take(&mut guard.wakers)
    };
    for waker in wakers {
      waker.wake();
    }
    true
  }
}

impl<T> Default for StreamCompletion<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Future for StreamCompletion<T>
where
  T: Clone,
{
  type Output = Result<T, StreamError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let mut guard = self.inner.lock();
    if let Some(result) = guard.result.clone() {
      return Poll::Ready(result);
    }
    if !guard.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
      guard.wakers.push(cx.waker().clone());
    }
    Poll::Pending
  }
}
