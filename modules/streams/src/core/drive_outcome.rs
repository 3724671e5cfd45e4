/// Result of one bounded pass over the stage mailboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
  /// At least one signal was handled; another pass may find more work.
  Progressed,
  /// Every mailbox was empty.
  Idle,
}

impl DriveOutcome {
  pub(crate) const fn from_progress(progressed: bool) -> Self {
    if progressed { Self::Progressed } else { Self::Idle }
  }

  /// Returns `true` when the pass handled a signal.
  #[must_use]
  pub const fn made_progress(self) -> bool {
    matches!(self, Self::Progressed)
  }
}
