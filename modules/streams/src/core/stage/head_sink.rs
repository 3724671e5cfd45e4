use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StageTermination,
  StreamCompletion, StreamError, downcast_value,
};

/// Resolves with the first element, then cancels upstream.
pub(crate) struct HeadSink<In> {
  _pd: PhantomData<fn(In)>,
}

impl<In> HeadSink<In> {
  pub(crate) const fn new() -> Self {
    Self { _pd: PhantomData }
  }
}

impl<In> GraphStage for HeadSink<In>
where
  In: Send + 'static,
{
  type Mat = StreamCompletion<In>;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<In>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let completion = StreamCompletion::new().with_canceller(ctx.cancel_handle());
    Ok((Box::new(HeadLogic { completion: completion.clone() }), completion))
  }

  fn kind(&self) -> StageKind {
    StageKind::SinkHead
  }
}

struct HeadLogic<In> {
  completion: StreamCompletion<In>,
}

impl<In> StageLogic for HeadLogic<In>
where
  In: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.request(0, 1)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    self.completion.complete(Ok(downcast_value::<In>(element)?));
    ctx.cancel(0);
    Ok(())
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    let result = match termination {
      | StageTermination::Completed => Err(StreamError::EmptyStream),
      | StageTermination::Cancelled => Err(StreamError::Cancelled),
      | StageTermination::Failed(error) => Err(error.clone()),
    };
    self.completion.complete(result);
  }
}
