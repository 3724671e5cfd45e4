/// Default per-edge buffer capacity.
pub const DEFAULT_BUFFER_CAPACITY: usize = 16;

/// Configuration for stream buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamBufferConfig {
  capacity: usize,
}

impl StreamBufferConfig {
  /// Creates a new configuration with the provided capacity.
  ///
  /// A capacity of zero is raised to one; an edge must be able to hold one element.
  #[must_use]
  pub const fn new(capacity: usize) -> Self {
    Self { capacity: if capacity == 0 { 1 } else { capacity } }
  }

  /// Returns the configured capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Updates the capacity.
  #[must_use]
  pub const fn with_capacity(self, capacity: usize) -> Self {
    Self::new(capacity)
  }
}

impl Default for StreamBufferConfig {
  fn default() -> Self {
    Self::new(DEFAULT_BUFFER_CAPACITY)
  }
}
