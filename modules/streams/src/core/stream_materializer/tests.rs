use crate::core::{
  KeepRight, Materializer, MaterializerConfig, Sink, Source, StreamDone, StreamError, StreamMaterializer,
};

#[test]
fn lifecycle_errors_are_reported() {
  let mut materializer = StreamMaterializer::new(MaterializerConfig::default());
  let graph = Source::from_iterator(1_u32..=3).to(Sink::ignore());
  assert_eq!(graph.run(&mut materializer).err(), Some(StreamError::NotStarted));
  assert_eq!(materializer.shutdown(), Err(StreamError::NotStarted));
  assert_eq!(materializer.start(), Ok(()));
  assert_eq!(materializer.start(), Err(StreamError::AlreadyStarted));
  assert_eq!(materializer.shutdown(), Ok(()));
  assert_eq!(materializer.shutdown(), Err(StreamError::AlreadyShutdown));
  assert_eq!(materializer.start(), Err(StreamError::AlreadyShutdown));
  assert_eq!(graph.run(&mut materializer).err(), Some(StreamError::AlreadyShutdown));
}

#[test]
fn terminated_streams_are_released() {
  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");
  let done = Source::from_iterator(1_u32..=3)
    .to_mat(Sink::ignore(), KeepRight)
    .run(&mut materializer)
    .expect("run")
    .into_materialized();
  assert_eq!(materializer.active_streams(), 1);
  materializer.run_until_idle();
  assert_eq!(materializer.active_streams(), 0);
  assert_eq!(done.try_take(), Some(Ok(StreamDone::new())));
}

#[test]
fn shutdown_cancels_running_streams() {
  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");
  let materialized = Source::repeat(1_u32).run_with(Sink::ignore(), &mut materializer).expect("run");
  materializer.drive();
  assert_eq!(materializer.active_streams(), 1);
  materializer.shutdown().expect("shutdown");
  assert_eq!(materializer.active_streams(), 0);
  assert!(materialized.handle().is_terminated());
  assert_eq!(materialized.materialized().try_take(), Some(Err(StreamError::Cancelled)));
}

#[test]
fn configuration_is_exposed() {
  let config = MaterializerConfig::new().with_drive_budget(8);
  let materializer = StreamMaterializer::new(config);
  assert_eq!(materializer.config().drive_budget(), 8);
}
