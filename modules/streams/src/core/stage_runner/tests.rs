use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};

use spin::Mutex;

use crate::core::{
  Completion, DynValue, Signal, StageContext, StageLogic, StageState, StageTermination, StreamError, StreamState,
  downcast_value, runner_harness::RunnerHarness,
};

/// Records received elements and requests a fixed amount on start.
struct RecordingSink {
  initial:     u64,
  received:    Arc<Mutex<Vec<u32>>>,
  termination: Arc<Mutex<Option<StageTermination>>>,
}

impl StageLogic for RecordingSink {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.initial > 0 {
      ctx.request(0, self.initial)?;
    }
    Ok(())
  }

  fn on_push(&mut self, _ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    self.received.lock().push(downcast_value::<u32>(element)?);
    Ok(())
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    *self.termination.lock() = Some(termination.clone());
  }
}

/// Pushes increasing numbers while downstream has demand.
struct CountingSource {
  next: u32,
}

impl StageLogic for CountingSource {
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, outlet: usize) -> Result<(), StreamError> {
    while ctx.has_demand(outlet) {
      ctx.push_value(outlet, self.next)?;
      self.next += 1;
    }
    Ok(())
  }
}

fn sink(initial: u64) -> (RunnerHarness, Arc<Mutex<Vec<u32>>>, Arc<Mutex<Option<StageTermination>>>) {
  let received = Arc::new(Mutex::new(Vec::new()));
  let termination = Arc::new(Mutex::new(None));
  let logic = RecordingSink { initial, received: received.clone(), termination: termination.clone() };
  (RunnerHarness::new(Box::new(logic), 1, 0), received, termination)
}

#[test]
fn push_without_demand_fails_the_receiver() {
  let (mut harness, received, termination) = sink(0);
  harness.start();
  harness.push(0, 7_u32);
  assert!(received.lock().is_empty());
  assert_eq!(harness.runner.state(), StageState::Failed);
  assert_eq!(
    *termination.lock(),
    Some(StageTermination::Failed(StreamError::ProtocolViolation { reason: "push without demand" }))
  );
  assert!(matches!(harness.upstream_signals(0).as_slice(), [Signal::Cancel { .. }]));
  assert_eq!(harness.shared.state(), StreamState::Failed);
}

#[test]
fn pushes_within_demand_are_delivered() {
  let (mut harness, received, _) = sink(2);
  harness.start();
  assert_eq!(harness.requested(0), 2);
  harness.push(0, 1_u32);
  harness.push(0, 2_u32);
  assert_eq!(*received.lock(), vec![1, 2]);
  harness.push(0, 3_u32);
  assert_eq!(harness.runner.state(), StageState::Failed);
}

#[test]
fn late_signals_after_completion_are_dropped() {
  let (mut harness, _, termination) = sink(1);
  harness.start();
  harness.complete(0);
  assert_eq!(*termination.lock(), Some(StageTermination::Completed));
  harness.complete(0);
  harness.push(0, 1_u32);
  assert_eq!(harness.runner.state(), StageState::Completed);
  assert_eq!(harness.shared.termination().poll(), Completion::Ready(Ok(crate::core::StreamDone::new())));
}

#[test]
fn duplicate_upstream_termination_is_a_protocol_violation() {
  struct Recovering;
  impl StageLogic for Recovering {
    fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
      ctx.request(0, 1)?;
      ctx.request(1, 1)
    }

    fn on_upstream_failure(
      &mut self,
      _ctx: &mut StageContext<'_>,
      _inlet: usize,
      _error: StreamError,
    ) -> Result<(), StreamError> {
      Ok(())
    }
  }
  let mut harness = RunnerHarness::new(Box::new(Recovering), 2, 0);
  harness.start();
  harness.runner.handle(Signal::Fail { inlet: 0, error: StreamError::processing("upstream") });
  assert_eq!(harness.runner.state(), StageState::Running);
  harness.complete(0);
  assert_eq!(harness.runner.state(), StageState::Failed);
  assert!(matches!(harness.upstream_signals(1).as_slice(), [Signal::Request { .. }, Signal::Cancel { .. }]));
}

#[test]
fn elements_on_cancelled_inlet_are_dropped() {
  struct CancelOnFirst;
  impl StageLogic for CancelOnFirst {
    fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
      ctx.request(0, 2)?;
      ctx.request(1, 1)
    }

    fn on_push(&mut self, ctx: &mut StageContext<'_>, inlet: usize, _element: DynValue) -> Result<(), StreamError> {
      ctx.cancel(inlet);
      Ok(())
    }
  }
  let mut harness = RunnerHarness::new(Box::new(CancelOnFirst), 2, 0);
  harness.start();
  harness.push(0, 1_u32);
  harness.push(0, 2_u32);
  assert_eq!(harness.runner.state(), StageState::Running);
  harness.complete(0);
  assert_eq!(harness.runner.state(), StageState::Running);
}

#[test]
fn accumulated_demand_allows_that_many_pushes() {
  let mut harness = RunnerHarness::new(Box::new(CountingSource { next: 0 }), 0, 1);
  harness.start();
  harness.request(0, 3);
  harness.request(0, 2);
  assert_eq!(harness.pushed::<u32>(0), vec![0, 1, 2, 3, 4]);
}

#[test]
fn zero_demand_fails_the_stage() {
  let mut harness = RunnerHarness::new(Box::new(CountingSource { next: 0 }), 0, 1);
  harness.start();
  harness.request(0, 0);
  assert_eq!(harness.runner.state(), StageState::Failed);
  assert!(matches!(harness.downstream_signals(0).as_slice(), [Signal::Fail { error: StreamError::InvalidDemand, .. }]));
}

#[test]
fn logic_error_fails_outlets_and_cancels_inlets() {
  struct FailOnPush;
  impl StageLogic for FailOnPush {
    fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
      ctx.request(0, 1)
    }

    fn on_push(&mut self, _ctx: &mut StageContext<'_>, _inlet: usize, _element: DynValue) -> Result<(), StreamError> {
      Err(StreamError::processing("bad element"))
    }
  }
  let mut harness = RunnerHarness::new(Box::new(FailOnPush), 1, 2);
  harness.start();
  let _ = harness.upstream_signals(0);
  harness.push(0, 1_u32);
  assert!(matches!(harness.upstream_signals(0).as_slice(), [Signal::Cancel { outlet: 0 }]));
  for outlet in 0..2 {
    assert!(matches!(harness.downstream_signals(outlet).as_slice(), [Signal::Fail { .. }]));
  }
  assert_eq!(harness.shared.termination().poll(), Completion::Ready(Err(StreamError::processing("bad element"))));
}

#[test]
fn downstream_cancel_propagates_upstream() {
  struct PassThrough;
  impl StageLogic for PassThrough {}
  let mut harness = RunnerHarness::new(Box::new(PassThrough), 1, 1);
  harness.start();
  harness.cancel(0);
  assert!(matches!(harness.upstream_signals(0).as_slice(), [Signal::Cancel { outlet: 0 }]));
  assert_eq!(harness.runner.state(), StageState::Completed);
}

#[test]
fn dropping_a_running_stage_reports_abrupt_termination() {
  let (mut harness, _, termination) = sink(1);
  harness.start();
  let shared = harness.shared.clone();
  drop(harness);
  assert_eq!(*termination.lock(), Some(StageTermination::Failed(StreamError::AbruptTermination)));
  assert_eq!(shared.state(), StreamState::Failed);
}
