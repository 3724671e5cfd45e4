use alloc::vec::Vec;

use super::{Inlet, Outlet};

/// Shape with a single input port and several output ports of one type.
#[derive(Debug)]
pub struct UniformFanOutShape<In, Out> {
  inlet:   Inlet<In>,
  outlets: Vec<Outlet<Out>>,
}

impl<In, Out> UniformFanOutShape<In, Out> {
  pub(crate) const fn new(inlet: Inlet<In>, outlets: Vec<Outlet<Out>>) -> Self {
    Self { inlet, outlets }
  }

  /// Returns the input port.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<In> {
    self.inlet
  }

  /// Returns the output ports.
  #[must_use]
  pub fn outlets(&self) -> &[Outlet<Out>] {
    &self.outlets
  }

  /// Returns the output port at `index`, if any.
  #[must_use]
  pub fn outlet(&self, index: usize) -> Option<Outlet<Out>> {
    self.outlets.get(index).copied()
  }

  /// Returns the number of output ports.
  #[must_use]
  pub fn port_count(&self) -> usize {
    self.outlets.len()
  }
}

impl<In, Out> Clone for UniformFanOutShape<In, Out> {
  fn clone(&self) -> Self {
    Self { inlet: self.inlet, outlets: self.outlets.clone() }
  }
}
