//! Materializer driven by the caller, without threads or an async runtime.

#[cfg(test)]
mod tests;

use alloc::collections::BTreeMap;

use super::{
  DriveOutcome, GraphInterpreter, Materialized, Materializer, MaterializerConfig, RunnableGraph, StreamError,
  StreamHandleId,
};

/// Materializer for manual driving.
///
/// Streams make progress only inside [`Self::drive`] and [`Self::run_until_idle`]. Terminated
/// streams are released after each drive.
pub struct StreamMaterializer {
  config:    MaterializerConfig,
  started:   bool,
  shut_down: bool,
  next_id:   u64,
  streams:   BTreeMap<StreamHandleId, GraphInterpreter>,
}

impl StreamMaterializer {
  /// Creates a new materializer instance.
  #[must_use]
  pub const fn new(config: MaterializerConfig) -> Self {
    Self { config, started: false, shut_down: false, next_id: 1, streams: BTreeMap::new() }
  }

  /// Returns the active configuration.
  #[must_use]
  pub const fn config(&self) -> &MaterializerConfig {
    &self.config
  }

  /// Returns the number of streams that have not terminated yet.
  #[must_use]
  pub fn active_streams(&self) -> usize {
    self.streams.len()
  }

  /// Drives every stream once.
  pub fn drive(&mut self) -> DriveOutcome {
    let mut progressed = false;
    for interpreter in self.streams.values_mut() {
      progressed |= interpreter.drive().made_progress();
    }
    self.streams.retain(|_, interpreter| !interpreter.is_terminated());
    DriveOutcome::from_progress(progressed)
  }

  /// Drives until no stream has queued signals.
  pub fn run_until_idle(&mut self) {
    while self.drive().made_progress() {}
  }
}

impl Default for StreamMaterializer {
  fn default() -> Self {
    Self::new(MaterializerConfig::default())
  }
}

impl Materializer for StreamMaterializer {
  fn start(&mut self) -> Result<(), StreamError> {
    if self.shut_down {
      return Err(StreamError::AlreadyShutdown);
    }
    if self.started {
      return Err(StreamError::AlreadyStarted);
    }
    self.started = true;
    Ok(())
  }

  fn materialize<Mat>(&mut self, graph: &RunnableGraph<Mat>) -> Result<Materialized<Mat>, StreamError>
  where
    Mat: Send + 'static, {
    if self.shut_down {
      return Err(StreamError::AlreadyShutdown);
    }
    if !self.started {
      return Err(StreamError::NotStarted);
    }
    let id = StreamHandleId::new(self.next_id);
    self.next_id += 1;
    let (interpreter, materialized) = GraphInterpreter::materialize(graph, &self.config, id)?;
    self.streams.insert(id, interpreter);
    Ok(materialized)
  }

  fn shutdown(&mut self) -> Result<(), StreamError> {
    if self.shut_down {
      return Err(StreamError::AlreadyShutdown);
    }
    if !self.started {
      return Err(StreamError::NotStarted);
    }
    for interpreter in self.streams.values() {
      interpreter.handle().cancel();
    }
    self.run_until_idle();
    self.streams.clear();
    self.shut_down = true;
    tracing::debug!("stream materializer shut down");
    Ok(())
  }
}
