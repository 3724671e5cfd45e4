use alloc::{boxed::Box, vec};
use core::marker::PhantomData;

use super::{Broadcast, BroadcastLogic};
use crate::core::{GraphError, GraphStage, Signal, StageState, runner_harness::RunnerHarness};

fn harness(outputs: usize) -> RunnerHarness {
  let logic: BroadcastLogic<u32> = BroadcastLogic { _pd: PhantomData };
  RunnerHarness::new(Box::new(logic), 1, outputs)
}

#[test]
fn zero_outputs_is_rejected() {
  assert!(matches!(Broadcast::<u32>::new(0), Err(GraphError::InvalidArgument { name: "outputs", .. })));
}

#[test]
fn shape_has_one_inlet_and_requested_outlets() {
  let broadcast = Broadcast::<u32>::new(3).expect("broadcast");
  let shape = broadcast.shape();
  assert_eq!(shape.inlets().len(), 1);
  assert_eq!(shape.outlets().len(), 3);
}

#[test]
fn pulls_only_when_every_output_has_demand() {
  let mut harness = harness(2);
  harness.start();
  harness.request(0, 1);
  assert_eq!(harness.requested(0), 0);
  harness.request(1, 1);
  assert_eq!(harness.requested(0), 1);
  harness.push(0, 5_u32);
  assert_eq!(harness.pushed::<u32>(0), vec![5]);
  assert_eq!(harness.pushed::<u32>(1), vec![5]);
  assert_eq!(harness.requested(0), 0);
}

#[test]
fn cancelled_output_no_longer_gates_upstream() {
  let mut harness = harness(2);
  harness.start();
  harness.request(0, 2);
  harness.cancel(1);
  assert_eq!(harness.requested(0), 1);
  harness.push(0, 9_u32);
  assert_eq!(harness.pushed::<u32>(0), vec![9]);
  assert_eq!(harness.requested(0), 1);
}

#[test]
fn upstream_is_cancelled_after_all_outputs_cancel() {
  let mut harness = harness(2);
  harness.start();
  harness.cancel(0);
  assert!(harness.upstream_signals(0).is_empty());
  harness.cancel(1);
  assert!(matches!(harness.upstream_signals(0).as_slice(), [Signal::Cancel { .. }]));
  assert_eq!(harness.runner.state(), StageState::Completed);
}
