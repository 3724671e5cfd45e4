use alloc::sync::Arc;
use core::task::Waker;

use super::{Signal, stage_mailbox::StageMailbox};

/// Waker posting [`Signal::Wake`] to a stage mailbox.
pub(crate) struct MailboxWaker {
  mailbox: Arc<dyn StageMailbox>,
}

impl MailboxWaker {
  pub(crate) fn waker(mailbox: Arc<dyn StageMailbox>) -> Waker {
    Waker::from(Arc::new(Self { mailbox }))
  }
}

impl alloc::task::Wake for MailboxWaker {
  fn wake(self: Arc<Self>) {
    self.wake_by_ref();
  }

  fn wake_by_ref(self: &Arc<Self>) {
    let _ = self.mailbox.post(Signal::Wake);
  }
}
