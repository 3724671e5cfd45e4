use rivulet_streams_rs::core::{KeepRight, Materializer, Sink, Source, StreamMaterializer};

fn main() {
  tracing_subscriber::fmt().with_env_filter("rivulet_streams_rs=debug").init();

  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");

  let graph = Source::from_iterator(vec!["alpha", "beta", "gamma"]).map(str::len).to_mat(Sink::collect(), KeepRight);
  let first = graph.run(&mut materializer).expect("first run").into_materialized();
  let second = graph.run(&mut materializer).expect("second run").into_materialized();
  materializer.run_until_idle();

  println!("first run: {:?}", first.try_take());
  println!("second run: {:?}", second.try_take());
  materializer.shutdown().expect("shutdown");
}
