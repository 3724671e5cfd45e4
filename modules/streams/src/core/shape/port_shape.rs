use alloc::vec::Vec;

use super::PortId;

/// Untyped ports of a custom stage, connected with
/// [`GraphBuilder::connect_ports`](crate::core::GraphBuilder::connect_ports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortShape {
  inlets:  Vec<PortId>,
  outlets: Vec<PortId>,
}

impl PortShape {
  pub(crate) const fn new(inlets: Vec<PortId>, outlets: Vec<PortId>) -> Self {
    Self { inlets, outlets }
  }

  /// Returns the input ports in declaration order.
  #[must_use]
  pub fn inlets(&self) -> &[PortId] {
    &self.inlets
  }

  /// Returns the output ports in declaration order.
  #[must_use]
  pub fn outlets(&self) -> &[PortId] {
    &self.outlets
  }
}
