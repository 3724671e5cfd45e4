use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StageTermination,
  StreamCompletion, StreamDone, StreamError, downcast_value, resolve,
};

/// Applies a side effect to every element; also backs the ignoring sink.
pub(crate) struct ForeachSink<F, In> {
  func: F,
  kind: StageKind,
  _pd:  PhantomData<fn(In)>,
}

impl<F, In> ForeachSink<F, In> {
  pub(crate) const fn new(func: F, kind: StageKind) -> Self {
    Self { func, kind, _pd: PhantomData }
  }
}

impl<F, In> GraphStage for ForeachSink<F, In>
where
  F: FnMut(In) + Clone + Send + Sync + 'static,
  In: Send + 'static,
{
  type Mat = StreamCompletion<StreamDone>;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<In>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let completion = StreamCompletion::new().with_canceller(ctx.cancel_handle());
    let logic: ForeachLogic<F, In> =
      ForeachLogic { func: self.func.clone(), completion: completion.clone(), _pd: PhantomData };
    Ok((Box::new(logic), completion))
  }

  fn kind(&self) -> StageKind {
    self.kind
  }
}

struct ForeachLogic<F, In> {
  func:       F,
  completion: StreamCompletion<StreamDone>,
  _pd:        PhantomData<fn(In)>,
}

impl<F, In> StageLogic for ForeachLogic<F, In>
where
  F: FnMut(In) + Send,
  In: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.top_up(0, ctx.buffer_capacity() as u64)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    (self.func)(downcast_value::<In>(element)?);
    ctx.top_up(0, ctx.buffer_capacity() as u64)
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    resolve(&self.completion, termination, StreamDone::new);
  }
}
