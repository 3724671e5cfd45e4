use super::StreamError;

/// Polling result for stream completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
  /// Completion is still pending.
  Pending,
  /// Completion is ready with the provided result.
  Ready(Result<T, StreamError>),
}

impl<T> Completion<T> {
  /// Returns `true` once the result is available.
  #[must_use]
  pub const fn is_ready(&self) -> bool {
    matches!(self, Self::Ready(_))
  }
}
