//! Port identifier shared between inlet and outlet ports.

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU64;

/// Identifies one port of a stage added to a [`GraphBuilder`](crate::core::GraphBuilder).
///
/// The token ties the port to the builder that handed it out; ports of other builders are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId {
  token: u64,
  stage: usize,
  slot:  usize,
}

impl PortId {
  pub(crate) const fn new(token: u64, stage: usize, slot: usize) -> Self {
    Self { token, stage, slot }
  }

  /// Returns a token not handed out before.
  pub(crate) fn next_token() -> u64 {
    static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
  }

  /// Returns the index of the owning stage within its builder.
  #[must_use]
  pub const fn stage(&self) -> usize {
    self.stage
  }

  /// Returns the port slot within the owning stage.
  #[must_use]
  pub const fn slot(&self) -> usize {
    self.slot
  }

  pub(crate) const fn token(&self) -> u64 {
    self.token
  }
}
