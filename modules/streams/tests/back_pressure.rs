use rivulet_streams_rs::core::{
  Broadcast, Flow, GraphBuilder, KeepBoth, KeepRight, Materializer, MaterializerConfig, Merge, Sink, Source,
  StreamBufferConfig, StreamError, StreamMaterializer, StreamState,
  testing::{TestSinkProbe, TestSourceProbe},
};

fn materializer_with_capacity(capacity: usize) -> StreamMaterializer {
  let config = MaterializerConfig::new().with_buffer_config(StreamBufferConfig::new(capacity)).with_drive_budget(3);
  let mut materializer = StreamMaterializer::new(config);
  materializer.start().expect("start");
  materializer
}

#[test]
fn upstream_demand_never_exceeds_the_edge_buffer() {
  let mut materializer = materializer_with_capacity(4);
  let graph = TestSourceProbe::<u32>::source()
    .via(Flow::new().map(|x: u32| x + 1))
    .to_mat(TestSinkProbe::manual(), KeepBoth);
  let (handle, (source, sink)) = graph.run(&mut materializer).expect("run").into_parts();

  sink.request(100);
  materializer.run_until_idle();
  assert!(source.demand() > 0);
  assert!(source.demand() <= 4);

  for value in 0..10 {
    source.send(value);
    materializer.run_until_idle();
    assert!(source.demand() <= 4);
  }
  source.complete();
  materializer.run_until_idle();
  assert_eq!(sink.elements(), (1..=10).collect::<Vec<u32>>());
  assert!(sink.is_completed());
  assert_eq!(handle.state(), StreamState::Completed);
}

#[test]
fn a_slow_sink_holds_elements_at_the_source() {
  let mut materializer = materializer_with_capacity(4);
  let graph = TestSourceProbe::<u32>::source()
    .via(Flow::new().map(|x: u32| x * 2))
    .to_mat(TestSinkProbe::manual(), KeepBoth);
  let (source, sink) = graph.run(&mut materializer).expect("run").into_materialized();
  for value in 0..10 {
    source.send(value);
  }

  sink.request(3);
  materializer.run_until_idle();
  assert_eq!(sink.elements(), vec![0, 2, 4]);
  assert!(source.queued() >= 3);

  sink.request(7);
  source.complete();
  materializer.run_until_idle();
  assert_eq!(sink.received(), 10);
  assert_eq!(source.queued(), 0);
  assert!(sink.is_completed());
}

#[test]
fn diamond_through_broadcast_and_merge_sums_both_branches() {
  let (mut builder, sum) =
    GraphBuilder::new().import_mat(Sink::fold(0_u32, |acc, x: u32| acc + x), KeepRight).expect("sink");
  let source = builder.add(Source::from_iterator(1_u32..=5)).expect("source");
  let broadcast = builder.add(Broadcast::<u32>::new(2).expect("broadcast")).expect("add broadcast");
  let tens = builder.add(Flow::<u32, u32, _>::new().map(|x| x * 10)).expect("tens");
  let ones = builder.add(Flow::<u32, u32, _>::new()).expect("ones");
  let merge = builder.add(Merge::<u32>::new(2).expect("merge")).expect("add merge");
  builder.connect(source.outlet(), broadcast.inlet()).expect("source to broadcast");
  builder.connect(broadcast.outlet(0).expect("outlet 0"), tens.inlet()).expect("to tens");
  builder.connect(broadcast.outlet(1).expect("outlet 1"), ones.inlet()).expect("to ones");
  builder.connect(tens.outlet(), merge.inlet(0).expect("inlet 0")).expect("tens to merge");
  builder.connect(ones.outlet(), merge.inlet(1).expect("inlet 1")).expect("ones to merge");
  builder.connect(merge.outlet(), sum.inlet()).expect("merge to sink");
  let graph = builder.build_closed().expect("closed");

  let mut materializer = materializer_with_capacity(1);
  let (handle, sum) = graph.run(&mut materializer).expect("run").into_parts();
  materializer.run_until_idle();
  assert_eq!(sum.try_take(), Some(Ok(165)));
  assert_eq!(handle.state(), StreamState::Completed);
}

#[test]
fn failure_in_a_branch_fails_the_whole_stream() {
  let (mut builder, items) = GraphBuilder::new().import_mat(Sink::<u32, _>::collect(), KeepRight).expect("sink");
  let first = builder.add(Source::from_iterator(1_u32..=3)).expect("first");
  let second = builder.add(Source::<u32, _>::failed(StreamError::processing("offline"))).expect("second");
  let merge = builder.add(Merge::<u32>::new(2).expect("merge")).expect("add merge");
  builder.connect(first.outlet(), merge.inlet(0).expect("inlet 0")).expect("first to merge");
  builder.connect(second.outlet(), merge.inlet(1).expect("inlet 1")).expect("second to merge");
  builder.connect(merge.outlet(), items.inlet()).expect("merge to sink");
  let graph = builder.build_closed().expect("closed");

  let mut materializer = materializer_with_capacity(2);
  let (handle, items) = graph.run(&mut materializer).expect("run").into_parts();
  materializer.run_until_idle();
  assert_eq!(items.try_take(), Some(Err(StreamError::processing("offline"))));
  assert_eq!(handle.state(), StreamState::Failed);
  assert_eq!(handle.termination().try_take(), Some(Err(StreamError::processing("offline"))));
}
