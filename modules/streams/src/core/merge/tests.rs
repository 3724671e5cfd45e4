use alloc::{boxed::Box, vec, vec::Vec};

use super::{Merge, MergeLogic};
use crate::core::{
  GraphBuilder, GraphError, GraphStage, Materializer, MaterializerConfig, Signal, Sink, Source, StageState,
  StreamBufferConfig, StreamMaterializer, runner_harness::RunnerHarness,
};

fn harness(inputs: usize) -> RunnerHarness {
  let logic = MergeLogic { pending: (0..inputs).map(|_| None).collect(), last_served: inputs - 1 };
  RunnerHarness::new(Box::new(logic), inputs, 1)
}

#[test]
fn zero_inputs_is_rejected() {
  assert!(matches!(Merge::<u32>::new(0), Err(GraphError::InvalidArgument { name: "inputs", .. })));
}

#[test]
fn shape_has_requested_inlets_and_one_outlet() {
  let shape = Merge::<u32>::new(3).expect("merge").shape();
  assert_eq!(shape.inlets().len(), 3);
  assert_eq!(shape.outlets().len(), 1);
}

#[test]
fn requests_inputs_only_while_downstream_has_demand() {
  let mut harness = harness(2);
  harness.start();
  assert_eq!(harness.requested(0), 0);
  assert_eq!(harness.requested(1), 0);
  harness.request(0, 1);
  assert_eq!(harness.requested(0), 1);
  assert_eq!(harness.requested(1), 1);
}

#[test]
fn pending_inputs_are_served_after_the_last_served_input() {
  let mut harness = harness(3);
  harness.start();
  harness.request(0, 1);
  harness.push(0, 10_u32);
  harness.push(2, 30_u32);
  harness.push(1, 20_u32);
  assert_eq!(harness.pushed::<u32>(0), vec![10]);
  harness.request(0, 1);
  assert_eq!(harness.pushed::<u32>(0), vec![20]);
  harness.request(0, 1);
  assert_eq!(harness.pushed::<u32>(0), vec![30]);
}

#[test]
fn completes_after_pending_elements_are_emitted() {
  let mut harness = harness(2);
  harness.start();
  harness.request(0, 1);
  harness.push(0, 1_u32);
  harness.push(1, 2_u32);
  harness.complete(0);
  harness.complete(1);
  assert_eq!(harness.pushed::<u32>(0), vec![1]);
  assert_eq!(harness.runner.state(), StageState::Completing);
  harness.request(0, 1);
  let signals = harness.downstream_signals(0);
  assert!(matches!(signals.as_slice(), [Signal::Push { .. }, Signal::Complete { .. }]));
  assert_eq!(harness.runner.state(), StageState::Completed);
}

#[test]
fn an_input_that_has_not_delivered_holds_back_the_others() {
  let mut harness = harness(2);
  harness.start();
  harness.request(0, 4);
  harness.push(0, 1_u32);
  assert_eq!(harness.pushed::<u32>(0), vec![1]);
  harness.push(0, 2_u32);
  assert_eq!(harness.pushed::<u32>(0), Vec::<u32>::new());
  harness.push(1, 10_u32);
  assert_eq!(harness.pushed::<u32>(0), vec![10, 2]);
}

#[test]
fn a_completed_input_no_longer_takes_a_turn() {
  let mut harness = harness(2);
  harness.start();
  harness.request(0, 3);
  harness.push(0, 1_u32);
  harness.push(0, 2_u32);
  harness.complete(1);
  assert_eq!(harness.pushed::<u32>(0), vec![1, 2]);
}

fn counts_from_endless_inputs(capacity: usize, budget: usize, total: u64) -> (usize, usize) {
  let config =
    MaterializerConfig::new().with_buffer_config(StreamBufferConfig::new(capacity)).with_drive_budget(budget);
  let mut materializer = StreamMaterializer::new(config);
  materializer.start().expect("start");

  let mut builder = GraphBuilder::new();
  let zeros = builder.add(Source::repeat(0_u32)).expect("zeros");
  let ones = builder.add(Source::repeat(1_u32)).expect("ones");
  let merge = builder.add(Merge::<u32>::new(2).expect("merge")).expect("add merge");
  builder.connect(zeros.outlet(), merge.inlet(0).expect("inlet 0")).expect("zeros to merge");
  builder.connect(ones.outlet(), merge.inlet(1).expect("inlet 1")).expect("ones to merge");
  let merged = builder.build_source(merge.outlet()).expect("source");

  let items = merged.take(total).run_with(Sink::collect(), &mut materializer).expect("run").into_materialized();
  materializer.run_until_idle();
  let items: Vec<u32> = items.try_take().expect("resolved").expect("collected");
  assert_eq!(items.len() as u64, total);
  let zeros = items.iter().filter(|item| **item == 0).count();
  (zeros, items.len() - zeros)
}

#[test]
fn endless_inputs_are_served_evenly() {
  for capacity in [1, 4, 16] {
    for budget in [1, 3, 64] {
      let (zeros, ones) = counts_from_endless_inputs(capacity, budget, 1000);
      assert!(zeros.abs_diff(ones) <= 1, "capacity {capacity} budget {budget}: {zeros} vs {ones}");
    }
  }
}
