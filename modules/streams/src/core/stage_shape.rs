use alloc::vec::Vec;
use core::any::{TypeId, type_name};

use super::GraphError;

/// Element types of a stage's ports, in port order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageShape {
  inlets:  Vec<PortType>,
  outlets: Vec<PortType>,
}

/// Element type carried by one port.
#[derive(Debug, Clone, Copy)]
pub struct PortType {
  id:   TypeId,
  name: &'static str,
}

impl PortType {
  /// Returns the port type for elements of type `T`.
  #[must_use]
  pub fn of<T: 'static>() -> Self {
    Self { id: TypeId::of::<T>(), name: type_name::<T>() }
  }

  /// Returns the type name, for diagnostics only.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for PortType {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for PortType {}

impl StageShape {
  /// Creates a shape without ports.
  #[must_use]
  pub const fn new() -> Self {
    Self { inlets: Vec::new(), outlets: Vec::new() }
  }

  /// Appends an inlet carrying `T`.
  #[must_use]
  pub fn with_inlet<T: 'static>(mut self) -> Self {
    self.inlets.push(PortType::of::<T>());
    self
  }

  /// Appends an outlet carrying `T`.
  #[must_use]
  pub fn with_outlet<T: 'static>(mut self) -> Self {
    self.outlets.push(PortType::of::<T>());
    self
  }

  /// Returns the inlet types.
  #[must_use]
  pub fn inlets(&self) -> &[PortType] {
    &self.inlets
  }

  /// Returns the outlet types.
  #[must_use]
  pub fn outlets(&self) -> &[PortType] {
    &self.outlets
  }

  /// Checks that the shape carries exactly the given port types.
  pub(crate) fn ensure(&self, inlets: &[PortType], outlets: &[PortType]) -> Result<(), GraphError> {
    if self.inlets == inlets && self.outlets == outlets {
      return Ok(());
    }
    Err(GraphError::ShapeMismatch { expected_inlets: inlets.len(), expected_outlets: outlets.len() })
  }
}
