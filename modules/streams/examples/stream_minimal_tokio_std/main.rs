use rivulet_streams_rs::{
  core::{Flow, Materializer, Sink, Source},
  std::TokioMaterializer,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  tracing_subscriber::fmt().with_env_filter("rivulet_streams_rs=debug").init();

  let squares = Flow::<u32, u32, _>::new().map(|x| x * x).filter(|x| x % 2 == 1);
  let mut materializer = TokioMaterializer::default();
  materializer.start().expect("start");

  let materialized = Source::from_iterator(1_u32..=10)
    .via(squares)
    .run_with(Sink::fold(0_u32, |acc, x| acc + x), &mut materializer)
    .expect("run");
  let (handle, sum) = materialized.into_parts();
  println!("sum of odd squares: {:?}", sum.await);
  println!("stream state: {:?}", handle.state());

  materializer.shutdown().expect("shutdown");
}
