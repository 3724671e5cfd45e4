use alloc::{string::String, sync::Arc, vec, vec::Vec};

use spin::Mutex;

use crate::core::{
  GraphError, Materializer, Merge, Sink, Source, StreamCompletion, StreamDone, StreamError, StreamMaterializer,
  StreamNotUsed,
};

fn materializer() -> StreamMaterializer {
  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");
  materializer
}

#[test]
fn ignore_resolves_on_completion() {
  let mut materializer = materializer();
  let done = Source::from_iterator(1_u32..=100).run_with(Sink::ignore(), &mut materializer).expect("run");
  materializer.run_until_idle();
  assert_eq!(done.materialized().try_take(), Some(Ok(StreamDone::new())));
}

#[test]
fn foreach_sees_every_element_in_order() {
  let mut materializer = materializer();
  let seen = Arc::new(Mutex::new(Vec::new()));
  let sink_seen = seen.clone();
  let sink = Sink::foreach(move |word: &'static str| sink_seen.lock().push(String::from(word)));
  let done = Source::from_iterator(vec!["a", "b", "c"]).run_with(sink, &mut materializer).expect("run");
  materializer.run_until_idle();
  assert_eq!(*seen.lock(), vec![String::from("a"), String::from("b"), String::from("c")]);
  assert!(matches!(done.materialized().try_take(), Some(Ok(_))));
}

#[test]
fn fold_starts_from_zero_on_every_run() {
  let mut materializer = materializer();
  let graph = Source::from_iterator(1_u64..=4).to_mat(Sink::fold(1_u64, |acc, x| acc * x), crate::core::KeepRight);
  let first = graph.run(&mut materializer).expect("first").into_materialized();
  let second = graph.run(&mut materializer).expect("second").into_materialized();
  materializer.run_until_idle();
  assert_eq!(first.try_take(), Some(Ok(24)));
  assert_eq!(second.try_take(), Some(Ok(24)));
}

#[test]
fn cancelling_a_sink_completion_cancels_the_stream() {
  let mut materializer = materializer();
  let items = Source::repeat(1_u32).run_with(Sink::collect(), &mut materializer).expect("run").into_materialized();
  materializer.drive();
  assert!(items.cancel());
  materializer.run_until_idle();
  assert_eq!(items.try_take(), Some(Err(StreamError::Cancelled)));
  assert_eq!(materializer.active_streams(), 0);
}

#[test]
fn mapped_materialized_value_is_applied_per_run() {
  let mut materializer = materializer();
  let sink: Sink<u32, bool> = Sink::<u32, StreamCompletion<StreamDone>>::ignore().map_materialized_value(|_| true);
  let flag = Source::from_iterator(1_u32..=2).run_with(sink, &mut materializer).expect("run").into_materialized();
  assert!(flag);
}

#[test]
fn sink_stage_must_have_one_inlet() {
  let merge = Merge::<u32>::new(2).expect("merge");
  let result: Result<Sink<u32, StreamNotUsed>, GraphError> = Sink::from_graph_stage(merge);
  assert!(matches!(result, Err(GraphError::ShapeMismatch { expected_inlets: 1, expected_outlets: 0 })));
}

#[test]
fn named_sink_reports_its_name() {
  let graph = Source::from_iterator(1_u32..=2).to(Sink::ignore().named("drain"));
  assert_eq!(graph.stage_names(), vec![String::from("iteratorSource"), String::from("drain")]);
}
