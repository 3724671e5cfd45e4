use alloc::sync::Arc;

use super::{Signal, stage_mailbox::StageMailbox};

/// Cancels one materialized stage from outside the stream.
///
/// Cancelling a stage makes it cancel its inlets and complete its outlets.
#[derive(Clone)]
pub struct CancelHandle {
  mailbox: Arc<dyn StageMailbox>,
}

impl CancelHandle {
  pub(crate) fn new(mailbox: Arc<dyn StageMailbox>) -> Self {
    Self { mailbox }
  }

  /// Requests cancellation; returns `false` when the stage already stopped.
  pub fn cancel(&self) -> bool {
    self.mailbox.post(Signal::Shutdown)
  }
}

impl core::fmt::Debug for CancelHandle {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("CancelHandle").finish_non_exhaustive()
  }
}
