extern crate std;

use alloc::{sync::Arc, vec, vec::Vec};
use core::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::{
  core::{
    GraphBuilder, KeepRight, Materializer, MaterializerConfig, Merge, Sink, Source, StreamError, StreamState,
  },
  std::TokioMaterializer,
};

const WAIT: Duration = Duration::from_secs(5);

async fn within<F: Future>(future: F) -> F::Output {
  tokio::time::timeout(WAIT, future).await.expect("stream did not finish in time")
}

fn started() -> TokioMaterializer {
  let mut materializer = TokioMaterializer::default();
  materializer.start().expect("start");
  materializer
}

#[test]
fn start_outside_a_runtime_fails() {
  let mut materializer = TokioMaterializer::default();
  assert_eq!(materializer.start(), Err(StreamError::ExecutorUnavailable));
}

#[tokio::test(flavor = "current_thread")]
async fn runs_a_linear_stream() {
  let mut materializer = started();
  let sum = Source::from_iterator(1_u64..=100)
    .map(|x| x * 2)
    .run_with(Sink::fold(0_u64, |acc, x| acc + x), &mut materializer)
    .expect("run")
    .into_materialized();
  assert_eq!(within(sum).await, Ok(10_100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn merged_sources_run_concurrently() {
  let mut materializer = started();
  let (mut builder, sink) = GraphBuilder::new().import_mat(Sink::<u32, _>::collect(), KeepRight).expect("sink");
  let low = builder.add(Source::from_iterator(0_u32..50)).expect("low");
  let high = builder.add(Source::from_iterator(100_u32..150)).expect("high");
  let merge = builder.add(Merge::<u32>::new(2).expect("merge")).expect("add merge");
  builder.connect(low.outlet(), merge.inlet(0).expect("inlet 0")).expect("low");
  builder.connect(high.outlet(), merge.inlet(1).expect("inlet 1")).expect("high");
  builder.connect(merge.outlet(), sink.inlet()).expect("sink");
  let graph = builder.build_closed().expect("closed");

  let items = graph.run(&mut materializer).expect("run").into_materialized();
  let mut items = within(items).await.expect("collected");
  items.sort_unstable();
  let expected: Vec<u32> = (0..50).chain(100..150).collect();
  assert_eq!(items, expected);
}

#[tokio::test(flavor = "current_thread")]
async fn async_source_is_woken_by_its_timer() {
  let mut materializer = started();
  let counter = Arc::new(AtomicU32::new(0));
  let producer = move || {
    let counter = counter.clone();
    async move {
      tokio::time::sleep(Duration::from_millis(1)).await;
      let next = counter.fetch_add(1, Ordering::Relaxed);
      (next < 4).then_some(next)
    }
  };
  let items =
    Source::from_async(producer).run_with(Sink::collect(), &mut materializer).expect("run").into_materialized();
  assert_eq!(within(items).await, Ok(vec![0, 1, 2, 3]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_stage_fails_the_stream() {
  let mut materializer = started();
  let materialized = Source::from_iterator(1_u32..=5)
    .map(|x| if x == 3 { panic!("bad element") } else { x })
    .run_with(Sink::ignore(), &mut materializer)
    .expect("run");
  let termination = materialized.handle().termination();
  assert_eq!(within(termination).await, Err(StreamError::processing("stage panicked")));
  assert_eq!(materialized.handle().state(), StreamState::Failed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_cancels_running_streams() {
  let mut materializer = started();
  let materialized = Source::repeat(1_u32).run_with(Sink::ignore(), &mut materializer).expect("run");
  tokio::time::sleep(Duration::from_millis(10)).await;
  assert_eq!(materializer.active_streams(), 1);
  materializer.shutdown().expect("shutdown");
  let termination = materialized.handle().termination();
  assert_eq!(within(termination).await, Err(StreamError::Cancelled));
  assert_eq!(materializer.active_streams(), 0);
  assert_eq!(materializer.shutdown(), Err(StreamError::AlreadyShutdown));
}

#[test]
fn explicit_handle_runs_without_entering_the_runtime() {
  let runtime = tokio::runtime::Builder::new_multi_thread().worker_threads(1).enable_time().build().expect("runtime");
  let mut materializer = TokioMaterializer::with_handle(MaterializerConfig::default(), runtime.handle().clone());
  materializer.start().expect("start");
  let head = Source::single(9_u8).run_with(Sink::head(), &mut materializer).expect("run").into_materialized();
  assert_eq!(runtime.block_on(within(head)), Ok(9));
}
