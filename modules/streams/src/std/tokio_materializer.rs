extern crate std;

#[cfg(test)]
mod tests;

use alloc::{sync::Arc, vec::Vec};
use std::panic::{AssertUnwindSafe, catch_unwind};

use ahash::RandomState;
use hashbrown::HashMap;
use tokio::{
  runtime::Handle,
  sync::mpsc::{UnboundedReceiver, unbounded_channel},
};

use super::tokio_mailbox::TokioMailbox;
use crate::core::{
  Materialized, Materializer, MaterializerConfig, RunnableGraph, Signal, StreamError, StreamHandle, StreamHandleId,
  instantiated_stream::instantiate, stage_mailbox::StageMailbox, stage_runner::StageRunner,
};

/// Materializer running every stage as its own Tokio task.
///
/// Stages of one stream run concurrently and communicate only through their mailboxes. A stage
/// whose logic panics fails with [`StreamError::Processing`]; the panic does not reach the
/// runtime.
pub struct TokioMaterializer {
  config:    MaterializerConfig,
  handle:    Option<Handle>,
  started:   bool,
  shut_down: bool,
  next_id:   u64,
  streams:   HashMap<StreamHandleId, StreamHandle, RandomState>,
}

impl TokioMaterializer {
  /// Creates a materializer that picks up the current runtime on [`Materializer::start`].
  #[must_use]
  pub fn new(config: MaterializerConfig) -> Self {
    Self {
      config,
      handle: None,
      started: false,
      shut_down: false,
      next_id: 1,
      streams: HashMap::with_hasher(RandomState::new()),
    }
  }

  /// Creates a materializer spawning its tasks on `handle`.
  #[must_use]
  pub fn with_handle(config: MaterializerConfig, handle: Handle) -> Self {
    let mut materializer = Self::new(config);
    materializer.handle = Some(handle);
    materializer
  }

  /// Returns the active configuration.
  #[must_use]
  pub const fn config(&self) -> &MaterializerConfig {
    &self.config
  }

  /// Returns the number of streams that have not terminated yet.
  #[must_use]
  pub fn active_streams(&self) -> usize {
    self.streams.values().filter(|handle| !handle.is_terminated()).count()
  }

  fn prune(&mut self) {
    self.streams.retain(|_, handle| !handle.is_terminated());
  }
}

impl Default for TokioMaterializer {
  fn default() -> Self {
    Self::new(MaterializerConfig::default())
  }
}

impl Materializer for TokioMaterializer {
  fn start(&mut self) -> Result<(), StreamError> {
    if self.shut_down {
      return Err(StreamError::AlreadyShutdown);
    }
    if self.started {
      return Err(StreamError::AlreadyStarted);
    }
    if self.handle.is_none() {
      let Ok(handle) = Handle::try_current() else {
        return Err(StreamError::ExecutorUnavailable);
      };
      self.handle = Some(handle);
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
    let Some(runtime) = self.handle.clone() else {
      return Err(StreamError::ExecutorUnavailable);
    };
    self.prune();
    let id = StreamHandleId::new(self.next_id);
    self.next_id += 1;

    let mut mailboxes: Vec<Arc<dyn StageMailbox>> = Vec::with_capacity(graph.stage_count());
    let mut inboxes = Vec::with_capacity(graph.stage_count());
    for _ in 0..graph.stage_count() {
      let (sender, receiver) = unbounded_channel();
      mailboxes.push(Arc::new(TokioMailbox::new(sender)));
      inboxes.push(receiver);
    }
    let stream = instantiate(graph, &self.config, id, &mailboxes)?;
    let budget = self.config.drive_budget();
    for (runner, inbox) in stream.runners.into_iter().zip(inboxes) {
      runtime.spawn(run_stage(runner, inbox, budget));
    }
    self.streams.insert(id, stream.handle.clone());
    Ok(Materialized::new(stream.handle, stream.materialized))
  }

  fn shutdown(&mut self) -> Result<(), StreamError> {
    if self.shut_down {
      return Err(StreamError::AlreadyShutdown);
    }
    if !self.started {
      return Err(StreamError::NotStarted);
    }
    for handle in self.streams.values() {
      handle.cancel();
    }
    self.streams.clear();
    self.shut_down = true;
    tracing::debug!("tokio materializer shut down");
    Ok(())
  }
}

/// Feeds the signals of one stage's mailbox into its runner until the stage terminates.
async fn run_stage(mut runner: StageRunner, mut inbox: UnboundedReceiver<Signal>, budget: usize) {
  let mut handled = 0;
  while let Some(signal) = inbox.recv().await {
    if catch_unwind(AssertUnwindSafe(|| runner.handle(signal))).is_err() {
      tracing::error!(stage = %runner.name(), "stage logic panicked");
      runner.abort(StreamError::processing("stage panicked"));
    }
    if runner.is_terminated() {
      break;
    }
    handled += 1;
    if handled == budget {
      handled = 0;
      tokio::task::yield_now().await;
    }
  }
  inbox.close();
}
