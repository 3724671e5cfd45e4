use super::StreamHandle;

/// Result of one materialization: the stream handle and the materialized value.
#[derive(Debug)]
pub struct Materialized<Mat> {
  handle:       StreamHandle,
  materialized: Mat,
}

impl<Mat> Materialized<Mat> {
  pub(crate) const fn new(handle: StreamHandle, materialized: Mat) -> Self {
    Self { handle, materialized }
  }

  /// Returns the stream handle.
  #[must_use]
  pub const fn handle(&self) -> &StreamHandle {
    &self.handle
  }

  /// Returns the materialized value.
  #[must_use]
  pub const fn materialized(&self) -> &Mat {
    &self.materialized
  }

  /// Consumes the result and returns the materialized value.
  #[must_use]
  pub fn into_materialized(self) -> Mat {
    self.materialized
  }

  /// Splits the result into handle and materialized value.
  #[must_use]
  pub fn into_parts(self) -> (StreamHandle, Mat) {
    (self.handle, self.materialized)
  }
}
