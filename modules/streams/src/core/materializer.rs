//! Materializer trait for running stream graphs.

use super::{Materialized, RunnableGraph, StreamError};

/// Turns runnable blueprints into running streams.
pub trait Materializer {
  /// Starts the materializer.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::AlreadyStarted` if the materializer is already running, or
  /// `StreamError::AlreadyShutdown` once it was shut down.
  fn start(&mut self) -> Result<(), StreamError>;

  /// Instantiates every stage of `graph`, wires the edges and starts the stages.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::NotStarted` if the materializer has not been started, or the error of
  /// a stage that could not be instantiated.
  fn materialize<Mat>(&mut self, graph: &RunnableGraph<Mat>) -> Result<Materialized<Mat>, StreamError>
  where
    Mat: Send + 'static;

  /// Cancels every running stream and stops accepting graphs.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::NotStarted` if the materializer never started, or
  /// `StreamError::AlreadyShutdown` if it is already stopped.
  fn shutdown(&mut self) -> Result<(), StreamError>;
}
