//! Stream attributes used to annotate stages and graphs.


use alloc::{string::String, vec::Vec};

/// Immutable collection of stream attributes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attributes {
  names:        Vec<String>,
  input_buffer: Option<usize>,
}

impl Attributes {
  /// Creates an empty attributes collection.
  #[must_use]
  pub const fn new() -> Self {
    Self { names: Vec::new(), input_buffer: None }
  }

  /// Creates attributes containing a single stage name.
  #[must_use]
  pub fn named(name: impl Into<String>) -> Self {
    Self { names: alloc::vec![name.into()], input_buffer: None }
  }

  /// Creates attributes overriding the inlet buffer capacity.
  ///
  /// A capacity of zero is raised to one.
  #[must_use]
  pub const fn input_buffer(capacity: usize) -> Self {
    Self { names: Vec::new(), input_buffer: Some(if capacity == 0 { 1 } else { capacity }) }
  }

  /// Appends attributes from another collection and returns a new value.
  ///
  /// An input buffer already present in `self` is kept.
  #[must_use]
  pub fn and(mut self, other: Self) -> Self {
    self.names.extend(other.names);
    if self.input_buffer.is_none() {
      self.input_buffer = other.input_buffer;
    }
    self
  }

  /// Returns all configured stage names.
  #[must_use]
  pub fn names(&self) -> &[String] {
    &self.names
  }

  /// Returns the innermost configured name, if any.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.names.first().map(String::as_str)
  }

  /// Returns the inlet buffer override, if any.
  #[must_use]
  pub const fn input_buffer_capacity(&self) -> Option<usize> {
    self.input_buffer
  }

  /// Returns `true` when no attributes have been configured.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.names.is_empty() && self.input_buffer.is_none()
  }
}

impl Default for Attributes {
  fn default() -> Self {
    Self::new()
  }
}
