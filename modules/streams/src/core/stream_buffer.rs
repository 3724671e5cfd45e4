//! Bounded element buffer owned by a single stage.

#[cfg(test)]
mod tests;

use alloc::collections::VecDeque;

use crate::core::stream_error::StreamError;

/// Fixed-capacity FIFO for elements a stage holds internally.
///
/// Offering beyond the capacity is a back-pressure violation, never a growth event.
pub struct StreamBuffer<T> {
  queue:    VecDeque<T>,
  capacity: usize,
}

impl<T> StreamBuffer<T> {
  /// Creates a new buffer with the given capacity.
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    Self { queue: VecDeque::with_capacity(capacity), capacity }
  }

  /// Attempts to enqueue a value into the buffer.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::BufferOverflow` when the buffer is full.
  pub fn offer(&mut self, value: T) -> Result<(), StreamError> {
    if self.queue.len() >= self.capacity {
      return Err(StreamError::BufferOverflow);
    }
    self.queue.push_back(value);
    Ok(())
  }

  /// Dequeues the oldest value, if any.
  pub fn poll(&mut self) -> Option<T> {
    self.queue.pop_front()
  }

  /// Returns the number of buffered elements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.queue.len()
  }

  /// Returns true when the buffer is empty.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  /// Returns true when no further element fits.
  #[must_use]
  pub fn is_full(&self) -> bool {
    self.queue.len() >= self.capacity
  }

  /// Returns the number of free slots.
  #[must_use]
  pub fn remaining_capacity(&self) -> usize {
    self.capacity.saturating_sub(self.queue.len())
  }

  /// Returns the buffer capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Drops every buffered element.
  pub fn clear(&mut self) {
    self.queue.clear();
  }
}
