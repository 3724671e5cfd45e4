use super::Outlet;

/// Shape with one output port.
#[derive(Debug)]
pub struct SourceShape<Out> {
  outlet: Outlet<Out>,
}

impl<Out> SourceShape<Out> {
  pub(crate) const fn new(outlet: Outlet<Out>) -> Self {
    Self { outlet }
  }

  /// Returns the output port.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }
}

impl<Out> Clone for SourceShape<Out> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<Out> Copy for SourceShape<Out> {}
