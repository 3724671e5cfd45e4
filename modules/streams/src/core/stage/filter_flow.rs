use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
  downcast_value,
};

/// Passes on the elements accepted by a predicate.
pub(crate) struct FilterFlow<F, T> {
  predicate: F,
  _pd:       PhantomData<fn(T)>,
}

impl<F, T> FilterFlow<F, T> {
  pub(crate) const fn new(predicate: F) -> Self {
    Self { predicate, _pd: PhantomData }
  }
}

impl<F, T> GraphStage for FilterFlow<F, T>
where
  F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
  T: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<T>().with_outlet::<T>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic: FilterLogic<F, T> = FilterLogic { predicate: self.predicate.clone(), _pd: PhantomData };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::FlowFilter
  }
}

struct FilterLogic<F, T> {
  predicate: F,
  _pd:       PhantomData<fn(T)>,
}

impl<F, T> StageLogic for FilterLogic<F, T>
where
  F: FnMut(&T) -> bool + Send,
  T: Send + 'static,
{
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    ctx.forward_demand(0, 0)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = downcast_value::<T>(element)?;
    if (self.predicate)(&value) {
      ctx.push_value(0, value)?;
    }
    ctx.forward_demand(0, 0)
  }
}
