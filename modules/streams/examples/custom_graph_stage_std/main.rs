use rivulet_streams_rs::core::{
  DynValue, Flow, GraphStage, KeepRight, MaterializeContext, Materializer, Sink, Source, StageContext, StageLogic,
  StageShape, StreamError, StreamMaterializer, StreamNotUsed, downcast_value,
};

/// Emits the running sum of its input.
struct RunningSum;

impl GraphStage for RunningSum {
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<i64>().with_outlet::<i64>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    Ok((Box::new(RunningSumLogic { total: 0 }), StreamNotUsed::new()))
  }
}

struct RunningSumLogic {
  total: i64,
}

impl StageLogic for RunningSumLogic {
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, outlet: usize) -> Result<(), StreamError> {
    ctx.forward_demand(0, outlet)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    self.total += downcast_value::<i64>(element)?;
    ctx.push_value(0, self.total)?;
    ctx.forward_demand(0, 0)
  }
}

fn main() {
  tracing_subscriber::fmt().with_env_filter("rivulet_streams_rs=debug").init();

  let running_sum = Flow::<i64, i64, StreamNotUsed>::from_graph_stage(RunningSum).expect("shape");
  let mut materializer = StreamMaterializer::default();
  materializer.start().expect("start");

  let sums = Source::from_iterator(vec![3_i64, -1, 4, -1, 5])
    .via(running_sum.named("runningSum"))
    .run_with(Sink::collect(), &mut materializer)
    .expect("run")
    .into_materialized();
  materializer.run_until_idle();
  println!("running sums: {:?}", sums.try_take());

  let graph = Source::from_iterator(1_i64..=3).to_mat(Sink::head(), KeepRight);
  println!("stages: {:?}", graph.stage_names());
  materializer.shutdown().expect("shutdown");
}
