//! State shared by every stage of one materialized stream.

#[cfg(test)]
mod tests;

use core::sync::atomic::Ordering;

use portable_atomic::{AtomicBool, AtomicUsize};
use spin::Mutex;

use super::{StageTermination, StreamCompletion, StreamDone, StreamError, StreamHandleId, StreamState};

pub(crate) struct StreamShared {
  id:          StreamHandleId,
  live_stages: AtomicUsize,
  started:     AtomicBool,
  cancelled:   AtomicBool,
  failure:     Mutex<Option<StreamError>>,
  termination: StreamCompletion<StreamDone>,
}

impl StreamShared {
  pub(crate) fn new(id: StreamHandleId, stage_count: usize) -> Self {
    let shared = Self {
      id,
      live_stages: AtomicUsize::new(stage_count),
      started: AtomicBool::new(false),
      cancelled: AtomicBool::new(false),
      failure: Mutex::new(None),
      termination: StreamCompletion::new(),
    };
    if stage_count == 0 {
      shared.termination.complete(Ok(StreamDone::new()));
    }
    shared
  }

  pub(crate) const fn id(&self) -> StreamHandleId {
    self.id
  }

  pub(crate) fn mark_started(&self) {
    self.started.store(true, Ordering::Release);
  }

  pub(crate) fn request_cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }

  /// Records that one stage reached its terminal state.
  pub(crate) fn stage_stopped(&self, termination: &StageTermination) {
    if let StageTermination::Failed(error) = termination {
      let mut failure = self.failure.lock();
      if failure.is_none() {
        *failure = Some(error.clone());
      }
    }
    if self.live_stages.fetch_sub(1, Ordering::AcqRel) != 1 {
      return;
    }
    let result = match self.state() {
      | StreamState::Failed => Err(self.failure.lock().clone().unwrap_or(StreamError::AbruptTermination)),
      | StreamState::Cancelled => Err(StreamError::Cancelled),
      | _ => Ok(StreamDone::new()),
    };
    tracing::debug!(stream = %self.id, ok = result.is_ok(), "stream terminated");
    self.termination.complete(result);
  }

  pub(crate) fn state(&self) -> StreamState {
    if self.live_stages.load(Ordering::Acquire) > 0 {
      return if self.started.load(Ordering::Acquire) { StreamState::Running } else { StreamState::Idle };
    }
    if self.failure.lock().is_some() {
      StreamState::Failed
    } else if self.cancelled.load(Ordering::Acquire) {
      StreamState::Cancelled
    } else {
      StreamState::Completed
    }
  }

  pub(crate) fn termination(&self) -> StreamCompletion<StreamDone> {
    self.termination.clone()
  }
}
