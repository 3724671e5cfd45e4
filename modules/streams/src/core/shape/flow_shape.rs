use super::{Inlet, Outlet};

/// Shape with one input port and one output port.
#[derive(Debug)]
pub struct FlowShape<In, Out> {
  inlet:  Inlet<In>,
  outlet: Outlet<Out>,
}

impl<In, Out> FlowShape<In, Out> {
  pub(crate) const fn new(inlet: Inlet<In>, outlet: Outlet<Out>) -> Self {
    Self { inlet, outlet }
  }

  /// Returns the input port.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<In> {
    self.inlet
  }

  /// Returns the output port.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }
}

impl<In, Out> Clone for FlowShape<In, Out> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<In, Out> Copy for FlowShape<In, Out> {}
