use alloc::sync::Arc;

use super::stage_mailbox::StageMailbox;

/// Port on the other side of an edge: the peer's mailbox and its local port slot.
#[derive(Clone)]
pub(crate) struct PeerPort {
  pub(crate) mailbox: Arc<dyn StageMailbox>,
  pub(crate) slot:    usize,
}

impl PeerPort {
  pub(crate) fn new(mailbox: Arc<dyn StageMailbox>, slot: usize) -> Self {
    Self { mailbox, slot }
  }
}
