use alloc::collections::VecDeque;

use spin::Mutex;

use super::{Signal, stage_mailbox::StageMailbox};

struct LocalMailboxState {
  queue:  VecDeque<Signal>,
  closed: bool,
}

/// Mailbox drained by the cooperative interpreter.
pub(crate) struct LocalMailbox {
  state: Mutex<LocalMailboxState>,
}

impl LocalMailbox {
  pub(crate) const fn new() -> Self {
    Self { state: Mutex::new(LocalMailboxState { queue: VecDeque::new(), closed: false }) }
  }

  pub(crate) fn pop(&self) -> Option<Signal> {
    self.state.lock().queue.pop_front()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.state.lock().queue.is_empty()
  }

  /// Stops accepting signals and drops the queued ones.
  pub(crate) fn close(&self) {
    let mut guard = self.state.lock();
    guard.closed = true;
    guard.queue.clear();
  }
}

impl StageMailbox for LocalMailbox {
  fn post(&self, signal: Signal) -> bool {
    let mut guard = self.state.lock();
    if guard.closed {
      return false;
    }
    guard.queue.push_back(signal);
    true
  }
}
