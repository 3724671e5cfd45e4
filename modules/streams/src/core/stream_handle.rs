use alloc::{sync::Arc, vec::Vec};

use super::{CancelHandle, StreamCompletion, StreamDone, StreamHandleId, StreamState, stream_shared::StreamShared};

/// Control handle of one materialized stream.
#[derive(Clone)]
pub struct StreamHandle {
  shared:    Arc<StreamShared>,
  terminals: Vec<CancelHandle>,
}

impl StreamHandle {
  pub(crate) const fn new(shared: Arc<StreamShared>, terminals: Vec<CancelHandle>) -> Self {
    Self { shared, terminals }
  }

  /// Returns the stream identifier.
  #[must_use]
  pub fn id(&self) -> StreamHandleId {
    self.shared.id()
  }

  /// Returns the current execution state.
  #[must_use]
  pub fn state(&self) -> StreamState {
    self.shared.state()
  }

  /// Returns `true` once every stage reached a terminal state.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.shared.state().is_terminal()
  }

  /// Cancels the stream by shutting down every stage without outlets.
  ///
  /// Cancellation travels upstream from there. Returns `false` when the stream already terminated.
  pub fn cancel(&self) -> bool {
    if self.is_terminated() {
      return false;
    }
    self.shared.request_cancel();
    let mut delivered = false;
    for terminal in &self.terminals {
      delivered |= terminal.cancel();
    }
    delivered
  }

  /// Returns a completion resolved once every stage terminated.
  ///
  /// Resolves with the first stage failure, [`StreamError::Cancelled`](super::StreamError::Cancelled)
  /// after [`Self::cancel`], or [`StreamDone`] otherwise.
  #[must_use]
  pub fn termination(&self) -> StreamCompletion<StreamDone> {
    self.shared.termination()
  }
}

impl core::fmt::Debug for StreamHandle {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("StreamHandle").field("id", &self.id()).field("state", &self.state()).finish()
  }
}
