use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
  downcast_value,
};

/// Applies a fallible function; the first error fails the stage.
pub(crate) struct TryMapFlow<F, In, Out> {
  func: F,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> TryMapFlow<F, In, Out> {
  pub(crate) const fn new(func: F) -> Self {
    Self { func, _pd: PhantomData }
  }
}

impl<F, In, Out> GraphStage for TryMapFlow<F, In, Out>
where
  F: FnMut(In) -> Result<Out, StreamError> + Clone + Send + Sync + 'static,
  In: Send + 'static,
  Out: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<In>().with_outlet::<Out>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic: TryMapLogic<F, In, Out> = TryMapLogic { func: self.func.clone(), _pd: PhantomData };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::FlowTryMap
  }
}

struct TryMapLogic<F, In, Out> {
  func: F,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> StageLogic for TryMapLogic<F, In, Out>
where
  F: FnMut(In) -> Result<Out, StreamError> + Send,
  In: Send + 'static,
  Out: Send + 'static,
{
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    ctx.forward_demand(0, 0)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = (self.func)(downcast_value::<In>(element)?)?;
    ctx.push_value(0, value)?;
    ctx.forward_demand(0, 0)
  }
}
