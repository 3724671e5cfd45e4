use super::StreamError;

/// Why a stage reached its terminal state.
///
/// Passed to [`StageLogic::post_stop`](super::StageLogic::post_stop) so a stage can release resources
/// and resolve its materialized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageTermination {
  /// Upstream finished and every element was handled.
  Completed,
  /// Downstream or the stream handle cancelled the stage.
  Cancelled,
  /// The stage failed or received a failure.
  Failed(StreamError),
}

impl StageTermination {
  /// Converts the termination into the result a materialized value should report.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::Cancelled`] or the failure cause.
  pub fn into_result(self) -> Result<(), StreamError> {
    match self {
      | Self::Completed => Ok(()),
      | Self::Cancelled => Err(StreamError::Cancelled),
      | Self::Failed(error) => Err(error),
    }
  }
}
