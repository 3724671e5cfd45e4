use tokio::sync::mpsc::UnboundedSender;

use crate::core::{Signal, stage_mailbox::StageMailbox};

/// Delivers signals to the task running one stage.
pub(crate) struct TokioMailbox {
  sender: UnboundedSender<Signal>,
}

impl TokioMailbox {
  pub(crate) const fn new(sender: UnboundedSender<Signal>) -> Self {
    Self { sender }
  }
}

impl StageMailbox for TokioMailbox {
  fn post(&self, signal: Signal) -> bool {
    self.sender.send(signal).is_ok()
  }
}
