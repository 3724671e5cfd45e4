//! Stream state definitions.

/// Execution state of a materialized stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
  /// Stream has not started yet.
  Idle,
  /// Stream is running.
  Running,
  /// Every stage completed successfully.
  Completed,
  /// At least one stage failed.
  Failed,
  /// Stream was cancelled through its handle.
  Cancelled,
}

impl StreamState {
  /// Returns `true` when the stream can no longer make progress.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
  }
}
