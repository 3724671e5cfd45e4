//! Cooperative, deterministic executor for one materialized stream.


use alloc::{sync::Arc, vec::Vec};

use super::{
  DriveOutcome, Materialized, MaterializerConfig, RunnableGraph, StreamError, StreamHandle, StreamHandleId,
  instantiated_stream::instantiate, local_mailbox::LocalMailbox, stage_mailbox::StageMailbox,
  stage_runner::StageRunner,
};

struct InterpretedStage {
  runner:  StageRunner,
  mailbox: Arc<LocalMailbox>,
}

/// Runs every stage of one stream on the calling thread.
///
/// Each [`Self::drive`] call visits the stages in graph order and lets each one process up to the
/// configured budget of queued signals.
pub struct GraphInterpreter {
  stages: Vec<InterpretedStage>,
  handle: StreamHandle,
  budget: usize,
}

impl GraphInterpreter {
  /// Instantiates `graph` and returns the interpreter with the materialized result.
  ///
  /// # Errors
  ///
  /// Returns the error of a stage that could not be instantiated.
  pub fn materialize<Mat>(
    graph: &RunnableGraph<Mat>,
    config: &MaterializerConfig,
    id: StreamHandleId,
  ) -> Result<(Self, Materialized<Mat>), StreamError>
  where
    Mat: Send + 'static, {
    let mailboxes: Vec<Arc<LocalMailbox>> = (0..graph.stage_count()).map(|_| Arc::new(LocalMailbox::new())).collect();
    let erased: Vec<Arc<dyn StageMailbox>> =
      mailboxes.iter().map(|mailbox| mailbox.clone() as Arc<dyn StageMailbox>).collect();
    let stream = instantiate(graph, config, id, &erased)?;
    let stages = stream
      .runners
      .into_iter()
      .zip(mailboxes)
      .map(|(runner, mailbox)| InterpretedStage { runner, mailbox })
      .collect();
    let interpreter = Self { stages, handle: stream.handle.clone(), budget: config.drive_budget() };
    Ok((interpreter, Materialized::new(stream.handle, stream.materialized)))
  }

  /// Returns the handle of the interpreted stream.
  #[must_use]
  pub const fn handle(&self) -> &StreamHandle {
    &self.handle
  }

  /// Processes queued signals once per stage.
  pub fn drive(&mut self) -> DriveOutcome {
    let mut progressed = false;
    for stage in &mut self.stages {
      if stage.runner.is_terminated() {
        continue;
      }
      for _ in 0..self.budget {
        let Some(signal) = stage.mailbox.pop() else {
          break;
        };
        progressed = true;
        stage.runner.handle(signal);
        if stage.runner.is_terminated() {
          stage.mailbox.close();
          break;
        }
      }
    }
    DriveOutcome::from_progress(progressed)
  }

  /// Drives until no stage has queued signals.
  ///
  /// A stream whose sources never complete and whose sinks never cancel does not become idle.
  pub fn run_until_idle(&mut self) {
    while self.drive().made_progress() {}
  }

  /// Returns `true` once every stage reached a terminal state.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.stages.iter().all(|stage| stage.runner.is_terminated())
  }

  /// Returns `true` when no stage has queued signals.
  #[must_use]
  pub fn is_idle(&self) -> bool {
    self.stages.iter().all(|stage| stage.runner.is_terminated() || stage.mailbox.is_empty())
  }
}
