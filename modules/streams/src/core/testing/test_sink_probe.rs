use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::{marker::PhantomData, task::Waker};

use spin::Mutex;

use super::{
  CancelHandle, DynValue, GraphStage, MaterializeContext, Sink, StageContext, StageDescriptor, StageLogic,
  StageShape, StageTermination, StreamError, StreamGraph, downcast_value,
};

struct SinkProbeState<T> {
  elements:  Vec<T>,
  requested: u64,
  completed: bool,
  cancelled: bool,
  failure:   Option<StreamError>,
}

/// Materialized handle of a probe sink.
///
/// A manual probe signals demand only through [`TestSinkProbe::request`]; an automatic probe
/// keeps its inlet buffer full.
pub struct TestSinkProbe<T> {
  state:  Arc<Mutex<SinkProbeState<T>>>,
  waker:  Waker,
  cancel: CancelHandle,
}

impl<T> Clone for TestSinkProbe<T> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), waker: self.waker.clone(), cancel: self.cancel.clone() }
  }
}

impl<T> TestSinkProbe<T>
where
  T: Send + 'static,
{
  /// Returns a sink that requests elements only when told to.
  #[must_use]
  pub fn manual() -> Sink<T, Self> {
    Self::sink(false)
  }

  /// Returns a sink that requests as many elements as its buffer holds.
  #[must_use]
  pub fn auto() -> Sink<T, Self> {
    Self::sink(true)
  }

  fn sink(auto: bool) -> Sink<T, Self> {
    Sink::from_graph(StreamGraph::from_stage(StageDescriptor::new(SinkProbeStage::<T> { auto, _pd: PhantomData })))
  }

  /// Signals demand for `n` more elements.
  ///
  /// Demand beyond the inlet buffer capacity is deferred until the buffer has room.
  pub fn request(&self, n: u64) {
    self.state.lock().requested += n;
    self.waker.wake_by_ref();
  }

  /// Cancels the probe's inlet; returns `false` when the stage already stopped.
  pub fn cancel(&self) -> bool {
    self.cancel.cancel()
  }

  /// Returns the number of elements received so far.
  #[must_use]
  pub fn received(&self) -> usize {
    self.state.lock().elements.len()
  }

  /// Removes and returns the elements received so far.
  #[must_use]
  pub fn take_elements(&self) -> Vec<T> {
    core::mem::take(&mut self.state.lock().elements)
  }

  /// Returns `true` once upstream completed.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.state.lock().completed
  }

  /// Returns `true` once the probe cancelled its inlet.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.state.lock().cancelled
  }

  /// Returns the error the stream failed with, if any.
  #[must_use]
  pub fn failure(&self) -> Option<StreamError> {
    self.state.lock().failure.clone()
  }
}

impl<T> TestSinkProbe<T>
where
  T: Clone,
{
  /// Returns a copy of the elements received so far.
  #[must_use]
  pub fn elements(&self) -> Vec<T> {
    self.state.lock().elements.clone()
  }
}

struct SinkProbeStage<T> {
  auto: bool,
  _pd:  PhantomData<fn(T)>,
}

impl<T> GraphStage for SinkProbeStage<T>
where
  T: Send + 'static,
{
  type Mat = TestSinkProbe<T>;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<T>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let state = Arc::new(Mutex::new(SinkProbeState {
      elements:  Vec::new(),
      requested: 0,
      completed: false,
      cancelled: false,
      failure:   None,
    }));
    let probe = TestSinkProbe { state: state.clone(), waker: ctx.waker(), cancel: ctx.cancel_handle() };
    Ok((Box::new(SinkProbeLogic { state, auto: self.auto }), probe))
  }
}

struct SinkProbeLogic<T> {
  state: Arc<Mutex<SinkProbeState<T>>>,
  auto:  bool,
}

impl<T> SinkProbeLogic<T> {
  fn pull(&self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if !ctx.is_inlet_open(0) {
      return Ok(());
    }
    let capacity = ctx.buffer_capacity() as u64;
    if self.auto {
      return ctx.top_up(0, capacity);
    }
    let room = capacity.saturating_sub(ctx.outstanding(0));
    let n = {
      let mut state = self.state.lock();
      let n = state.requested.min(room);
      state.requested -= n;
      n
    };
    if n > 0 {
      ctx.request(0, n)?;
    }
    Ok(())
  }
}

impl<T> StageLogic for SinkProbeLogic<T>
where
  T: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.pull(ctx)
  }

  fn on_wake(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.pull(ctx)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = downcast_value::<T>(element)?;
    self.state.lock().elements.push(value);
    self.pull(ctx)
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    let mut state = self.state.lock();
    match termination {
      | StageTermination::Completed => state.completed = true,
      | StageTermination::Cancelled => state.cancelled = true,
      | StageTermination::Failed(error) => state.failure = Some(error.clone()),
    }
  }
}
