use alloc::{vec, vec::Vec};

use crate::core::{
  Broadcast, CustomStage, Flow, GraphBuilder, GraphError, KeepBoth, KeepRight, Materializer, Merge, Sink, Source,
  StreamMaterializer,
};

fn materializer() -> StreamMaterializer {
  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");
  materializer
}

#[test]
fn broadcast_feeds_every_sink() {
  let (builder, left) =
    GraphBuilder::new().import_mat(Sink::fold(0_u32, |acc, x: u32| acc + x), KeepRight).expect("left");
  let (mut builder, right) = builder.import_mat(Sink::<u32, _>::collect(), KeepBoth).expect("right");
  let source = builder.add(Source::from_iterator(1_u32..=4)).expect("source");
  let broadcast = builder.add(Broadcast::<u32>::new(2).expect("broadcast")).expect("add broadcast");
  builder.connect(source.outlet(), broadcast.inlet()).expect("source to broadcast");
  builder.connect(broadcast.outlet(0).expect("outlet 0"), left.inlet()).expect("to left");
  builder.connect(broadcast.outlet(1).expect("outlet 1"), right.inlet()).expect("to right");
  let graph = builder.build_closed().expect("closed");
  assert_eq!(graph.stage_count(), 4);

  let mut materializer = materializer();
  let (sum, items) = graph.run(&mut materializer).expect("run").into_materialized();
  materializer.run_until_idle();
  assert_eq!(sum.try_take(), Some(Ok(10)));
  assert_eq!(items.try_take(), Some(Ok(vec![1, 2, 3, 4])));
}

#[test]
fn merge_interleaves_every_input() {
  let (mut builder, sink) = GraphBuilder::new().import_mat(Sink::<u32, _>::collect(), KeepRight).expect("sink");
  let first = builder.add(Source::from_iterator(vec![1_u32, 2, 3])).expect("first");
  let second = builder.add(Source::from_iterator(vec![10_u32, 20, 30])).expect("second");
  let merge = builder.add(Merge::<u32>::new(2).expect("merge")).expect("add merge");
  builder.connect(first.outlet(), merge.inlet(0).expect("inlet 0")).expect("first to merge");
  builder.connect(second.outlet(), merge.inlet(1).expect("inlet 1")).expect("second to merge");
  builder.connect(merge.outlet(), sink.inlet()).expect("merge to sink");
  let graph = builder.build_closed().expect("closed");

  let mut materializer = materializer();
  let items = graph.run(&mut materializer).expect("run").into_materialized();
  materializer.run_until_idle();
  let mut items: Vec<u32> = items.try_take().expect("resolved").expect("collected");
  let firsts: Vec<u32> = items.iter().copied().filter(|item| *item < 10).collect();
  assert_eq!(firsts, vec![1, 2, 3]);
  items.sort_unstable();
  assert_eq!(items, vec![1, 2, 3, 10, 20, 30]);
}

#[test]
fn partial_graph_becomes_a_source() {
  let mut builder = GraphBuilder::new();
  let source = builder.add(Source::from_iterator(1_u32..=3)).expect("source");
  let flow = builder.add(Flow::<u32, u32, _>::new().map(|x| x * 10)).expect("flow");
  builder.connect(source.outlet(), flow.inlet()).expect("connect");
  let source = builder.build_source(flow.outlet()).expect("source");

  let mut materializer = materializer();
  let items = source.run_with(Sink::collect(), &mut materializer).expect("run").into_materialized();
  materializer.run_until_idle();
  assert_eq!(items.try_take(), Some(Ok(vec![10, 20, 30])));
}

#[test]
fn ports_of_another_builder_are_rejected() {
  let mut other = GraphBuilder::new();
  let foreign = other.add(Source::from_iterator(1_u32..=3)).expect("foreign");
  let mut builder = GraphBuilder::new();
  let sink = builder.add(Sink::<u32, _>::ignore()).expect("sink");
  assert_eq!(builder.connect(foreign.outlet(), sink.inlet()), Err(GraphError::UnknownStage));
}

#[test]
fn a_port_connects_once() {
  let mut builder = GraphBuilder::new();
  let source = builder.add(Source::from_iterator(1_u32..=3)).expect("source");
  let first = builder.add(Sink::<u32, _>::ignore()).expect("first");
  let second = builder.add(Sink::<u32, _>::ignore()).expect("second");
  builder.connect(source.outlet(), first.inlet()).expect("connect");
  assert!(matches!(
    builder.connect(source.outlet(), second.inlet()),
    Err(GraphError::PortAlreadyConnected { .. })
  ));
}

#[test]
fn untyped_ports_check_element_types() {
  let mut builder = GraphBuilder::new();
  let source = builder.add(Source::from_iterator(1_u32..=3)).expect("source");
  let sink = builder.add(Sink::<u64, _>::ignore()).expect("sink");
  assert!(matches!(
    builder.connect_ports(source.outlet().id(), sink.inlet().id()),
    Err(GraphError::TypeMismatch { .. })
  ));
}

#[test]
fn open_ports_prevent_closing() {
  let mut builder = GraphBuilder::new();
  builder.add(Source::from_iterator(1_u32..=3)).expect("source");
  assert!(matches!(builder.build_closed(), Err(GraphError::UnconnectedPort { slot: 0, .. })));
}

#[test]
fn boundary_must_be_an_open_port() {
  let mut builder = GraphBuilder::new();
  let source = builder.add(Source::from_iterator(1_u32..=3)).expect("source");
  let sink = builder.add(Sink::<u32, _>::ignore()).expect("sink");
  builder.connect(source.outlet(), sink.inlet()).expect("connect");
  assert!(matches!(builder.build_source(source.outlet()), Err(GraphError::UnexpectedBoundary)));
}

fn feedback_graph(buffered: bool) -> Result<(), GraphError> {
  let mut builder = GraphBuilder::new();
  let source = builder.add(Source::from_iterator(1_u32..=3).take(3))?;
  let merge = builder.add(Merge::<u32>::new(2)?)?;
  let broadcast = builder.add(Broadcast::<u32>::new(2)?)?;
  let back = if buffered { Flow::<u32, u32, _>::new().buffer(4)?.take(0) } else { Flow::new().take(0) };
  let back = builder.add(back)?;
  let sink = builder.add(Sink::<u32, _>::ignore())?;
  builder.connect(source.outlet(), merge.inlet(0).ok_or(GraphError::UnknownStage)?)?;
  builder.connect(merge.outlet(), broadcast.inlet())?;
  builder.connect(broadcast.outlet(0).ok_or(GraphError::UnknownStage)?, back.inlet())?;
  builder.connect(back.outlet(), merge.inlet(1).ok_or(GraphError::UnknownStage)?)?;
  builder.connect(broadcast.outlet(1).ok_or(GraphError::UnknownStage)?, sink.inlet())?;
  builder.build_closed().map(|_| ())
}

#[test]
fn cycles_need_a_buffering_stage() {
  assert_eq!(feedback_graph(false), Err(GraphError::UnbufferedCycle));
  assert_eq!(feedback_graph(true), Ok(()));
}

#[test]
fn custom_stage_exposes_declared_ports() {
  let mut builder = GraphBuilder::new();
  let shape = builder.add(CustomStage::new(Merge::<u32>::new(3).expect("merge"))).expect("custom");
  assert_eq!(shape.inlets().len(), 3);
  assert_eq!(shape.outlets().len(), 1);
  assert_eq!(builder.stage_count(), 1);
}
