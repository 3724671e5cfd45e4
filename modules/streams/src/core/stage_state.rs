/// Lifecycle of one materialized stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
  /// Created, no signal received yet.
  Idle,
  /// Processing signals.
  Running,
  /// Every inlet finished; buffered elements are still draining.
  Completing,
  /// Every port closed normally.
  Completed,
  /// Terminated by an error.
  Failed,
}

impl StageState {
  /// Returns `true` for `Completed` and `Failed`.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Failed)
  }
}
