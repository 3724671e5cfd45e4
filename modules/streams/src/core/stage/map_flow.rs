use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
  downcast_value,
};

/// Applies a function to every element; also backs the identity flow.
pub(crate) struct MapFlow<F, In, Out> {
  func: F,
  kind: StageKind,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> MapFlow<F, In, Out> {
  pub(crate) const fn new(func: F, kind: StageKind) -> Self {
    Self { func, kind, _pd: PhantomData }
  }
}

impl<F, In, Out> GraphStage for MapFlow<F, In, Out>
where
  F: FnMut(In) -> Out + Clone + Send + Sync + 'static,
  In: Send + 'static,
  Out: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<In>().with_outlet::<Out>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic: MapLogic<F, In, Out> = MapLogic { func: self.func.clone(), _pd: PhantomData };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    self.kind
  }
}

struct MapLogic<F, In, Out> {
  func: F,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> StageLogic for MapLogic<F, In, Out>
where
  F: FnMut(In) -> Out + Send,
  In: Send + 'static,
  Out: Send + 'static,
{
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    ctx.forward_demand(0, 0)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = downcast_value::<In>(element)?;
    ctx.push_value(0, (self.func)(value))?;
    ctx.forward_demand(0, 0)
  }
}
