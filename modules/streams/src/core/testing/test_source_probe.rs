use alloc::{boxed::Box, collections::VecDeque, sync::Arc};
use core::{marker::PhantomData, task::Waker};

use spin::Mutex;

use super::{
  GraphStage, MaterializeContext, Source, StageContext, StageDescriptor, StageLogic, StageShape, StageTermination,
  StreamError, StreamGraph,
};

struct SourceProbeState<T> {
  queue:     VecDeque<T>,
  outcome:   Option<Result<(), StreamError>>,
  demand:    u64,
  cancelled: bool,
}

/// Materialized handle of a probe source.
///
/// Elements sent through the handle are queued and emitted as downstream demand allows.
pub struct TestSourceProbe<T> {
  state: Arc<Mutex<SourceProbeState<T>>>,
  waker: Waker,
}

impl<T> Clone for TestSourceProbe<T> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), waker: self.waker.clone() }
  }
}

impl<T> TestSourceProbe<T>
where
  T: Send + 'static,
{
  /// Returns a source emitting what is sent through its materialized probe.
  #[must_use]
  pub fn source() -> Source<T, Self> {
    Source::from_graph(StreamGraph::from_stage(StageDescriptor::new(SourceProbeStage::<T> { _pd: PhantomData })))
  }

  /// Queues `value` for emission.
  pub fn send(&self, value: T) {
    self.state.lock().queue.push_back(value);
    self.waker.wake_by_ref();
  }

  /// Completes the source once every queued element was emitted.
  pub fn complete(&self) {
    self.finish(Ok(()));
  }

  /// Fails the source once every queued element was emitted.
  pub fn fail(&self, error: StreamError) {
    self.finish(Err(error));
  }

  /// Returns the downstream demand not yet satisfied, as seen by the last emission.
  #[must_use]
  pub fn demand(&self) -> u64 {
    self.state.lock().demand
  }

  /// Returns the number of queued elements not yet emitted.
  #[must_use]
  pub fn queued(&self) -> usize {
    self.state.lock().queue.len()
  }

  /// Returns `true` once downstream cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.state.lock().cancelled
  }

  fn finish(&self, outcome: Result<(), StreamError>) {
    let mut state = self.state.lock();
    if state.outcome.is_none() {
      state.outcome = Some(outcome);
    }
    drop(state);
    self.waker.wake_by_ref();
  }
}

struct SourceProbeStage<T> {
  _pd: PhantomData<fn() -> T>,
}

impl<T> GraphStage for SourceProbeStage<T>
where
  T: Send + 'static,
{
  type Mat = TestSourceProbe<T>;

  fn shape(&self) -> StageShape {
    StageShape::new().with_outlet::<T>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let state =
      Arc::new(Mutex::new(SourceProbeState { queue: VecDeque::new(), outcome: None, demand: 0, cancelled: false }));
    let probe = TestSourceProbe { state: state.clone(), waker: ctx.waker() };
    Ok((Box::new(SourceProbeLogic { state }), probe))
  }
}

struct SourceProbeLogic<T> {
  state: Arc<Mutex<SourceProbeState<T>>>,
}

impl<T> SourceProbeLogic<T>
where
  T: Send + 'static,
{
  fn emit(&self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if !ctx.is_outlet_open(0) {
      return Ok(());
    }
    let mut state = self.state.lock();
    while ctx.has_demand(0) {
      let Some(value) = state.queue.pop_front() else {
        break;
      };
      ctx.push_value(0, value)?;
    }
    state.demand = ctx.demand(0).saturated();
    if state.queue.is_empty() {
      match state.outcome.take() {
        | Some(Ok(())) => ctx.complete(0),
        | Some(Err(error)) => return Err(error),
        | None => {},
      }
    }
    Ok(())
  }
}

impl<T> StageLogic for SourceProbeLogic<T>
where
  T: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_wake(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_downstream_finish(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.state.lock().cancelled = true;
    ctx.complete_stage();
    Ok(())
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    if matches!(termination, StageTermination::Cancelled) {
      self.state.lock().cancelled = true;
    }
  }
}
