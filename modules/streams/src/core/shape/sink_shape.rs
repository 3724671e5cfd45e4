use super::Inlet;

/// Shape with one input port.
#[derive(Debug)]
pub struct SinkShape<In> {
  inlet: Inlet<In>,
}

impl<In> SinkShape<In> {
  pub(crate) const fn new(inlet: Inlet<In>) -> Self {
    Self { inlet }
  }

  /// Returns the input port.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<In> {
    self.inlet
  }
}

impl<In> Clone for SinkShape<In> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<In> Copy for SinkShape<In> {}
