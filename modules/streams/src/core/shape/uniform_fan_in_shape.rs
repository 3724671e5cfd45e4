use alloc::vec::Vec;

use super::{Inlet, Outlet};

/// Shape with several input ports of one type and a single output port.
#[derive(Debug)]
pub struct UniformFanInShape<In, Out> {
  inlets: Vec<Inlet<In>>,
  outlet: Outlet<Out>,
}

impl<In, Out> UniformFanInShape<In, Out> {
  pub(crate) const fn new(inlets: Vec<Inlet<In>>, outlet: Outlet<Out>) -> Self {
    Self { inlets, outlet }
  }

  /// Returns the input ports.
  #[must_use]
  pub fn inlets(&self) -> &[Inlet<In>] {
    &self.inlets
  }

  /// Returns the input port at `index`, if any.
  #[must_use]
  pub fn inlet(&self, index: usize) -> Option<Inlet<In>> {
    self.inlets.get(index).copied()
  }

  /// Returns the output port.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }

  /// Returns the number of input ports.
  #[must_use]
  pub fn port_count(&self) -> usize {
    self.inlets.len()
  }
}

impl<In, Out> Clone for UniformFanInShape<In, Out> {
  fn clone(&self) -> Self {
    Self { inlets: self.inlets.clone(), outlet: self.outlet }
  }
}
