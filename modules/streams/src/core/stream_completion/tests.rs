use alloc::{sync::Arc, task::Wake};
use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll, Waker},
};

use portable_atomic::{AtomicUsize, Ordering};

use super::StreamCompletion;
use crate::core::{Completion, StreamError};

struct CountingWaker {
  wakes: AtomicUsize,
}

impl Wake for CountingWaker {
  fn wake(self: Arc<Self>) {
    self.wakes.fetch_add(1, Ordering::SeqCst);
  }
}

#[test]
fn completion_starts_pending() {
  let completion = StreamCompletion::<u32>::new();
  assert_eq!(completion.poll(), Completion::Pending);
}

#[test]
fn completion_reports_ready_result() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  assert!(completion.complete(Ok(7)));
  assert_eq!(completion.poll(), Completion::Ready(Ok(7)));
}

#[test]
fn completion_try_take_consumes_result() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  completion.complete(Err(StreamError::Cancelled));
  assert_eq!(completion.try_take(), Some(Err(StreamError::Cancelled)));
  assert_eq!(completion.poll(), Completion::Pending);
}

#[test]
fn first_resolution_wins() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  assert!(completion.complete(Ok(1)));
  assert!(!completion.complete(Err(StreamError::AbruptTermination)));
  assert_eq!(completion.poll(), Completion::Ready(Ok(1)));
}

#[test]
fn awaiting_registers_waker_and_wakes_on_resolution() {
  let counter = Arc::new(CountingWaker { wakes: AtomicUsize::new(0) });
  let waker = Waker::from(counter.clone());
  let mut cx = Context::from_waker(&waker);
  let mut completion: StreamCompletion<u32> = StreamCompletion::new();
  let observer = completion.clone();

  assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Pending);
  assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Pending);
  observer.complete(Ok(42));

  assert_eq!(counter.wakes.load(Ordering::SeqCst), 1);
  assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Ready(Ok(42)));
}

#[test]
fn unbound_completion_cannot_cancel() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  assert!(!completion.cancel());
}
