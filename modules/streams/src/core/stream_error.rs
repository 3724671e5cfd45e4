//! Stream error definitions.

#[cfg(test)]
mod tests;

use alloc::string::String;

use super::GraphError;

/// Errors produced while a stream is materialized or running.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
  /// A signal broke the demand/signal protocol on an edge.
  #[error("protocol violation: {reason}")]
  ProtocolViolation {
    /// Which rule was broken.
    reason: &'static str,
  },
  /// Demand request is invalid.
  #[error("invalid demand request")]
  InvalidDemand,
  /// A stage tried to hold more elements than its buffer capacity.
  #[error("buffer overflow")]
  BufferOverflow,
  /// A stage requested more elements than its inlet buffer can hold.
  #[error("back-pressure violation: requested {requested} with capacity {capacity}")]
  BackpressureViolation {
    /// Outstanding demand after the rejected request.
    requested: u64,
    /// Configured inlet capacity.
    capacity:  usize,
  },
  /// An element or materialized value had an unexpected type.
  #[error("type mismatch")]
  TypeMismatch,
  /// User-supplied processing logic failed.
  #[error("stage processing failed: {0}")]
  Processing(String),
  /// An external resource used by a stage failed.
  #[error("resource failure: {0}")]
  Resource(String),
  /// The stream completed without producing a required element.
  #[error("stream completed without elements")]
  EmptyStream,
  /// The stream was cancelled before producing a result.
  #[error("stream cancelled")]
  Cancelled,
  /// A stage stopped before resolving its materialized value.
  #[error("stage terminated abruptly")]
  AbruptTermination,
  /// The materializer has not been started.
  #[error("materializer not started")]
  NotStarted,
  /// The materializer has already been started.
  #[error("materializer already started")]
  AlreadyStarted,
  /// The materializer has already been shut down.
  #[error("materializer already shut down")]
  AlreadyShutdown,
  /// Required executor is unavailable.
  #[error("executor is unavailable")]
  ExecutorUnavailable,
  /// The graph handed to the materializer is inconsistent.
  #[error("invalid graph: {0}")]
  InvalidGraph(#[from] GraphError),
}

impl StreamError {
  /// Creates a processing error from any displayable failure.
  #[must_use]
  pub fn processing(error: impl core::fmt::Display) -> Self {
    Self::Processing(alloc::format!("{error}"))
  }

  /// Creates a resource error from any displayable failure.
  #[must_use]
  pub fn resource(error: impl core::fmt::Display) -> Self {
    Self::Resource(alloc::format!("{error}"))
  }
}
