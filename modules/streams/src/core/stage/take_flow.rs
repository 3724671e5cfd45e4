use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
};

/// Passes on the first `limit` elements, then completes downstream and cancels upstream.
pub(crate) struct TakeFlow<T> {
  limit: u64,
  _pd:   PhantomData<fn(T)>,
}

impl<T> TakeFlow<T> {
  pub(crate) const fn new(limit: u64) -> Self {
    Self { limit, _pd: PhantomData }
  }
}

impl<T> GraphStage for TakeFlow<T>
where
  T: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<T>().with_outlet::<T>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    Ok((Box::new(TakeLogic { remaining: self.limit }), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::FlowTake
  }
}

struct TakeLogic {
  remaining: u64,
}

impl TakeLogic {
  fn pull(&self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let target = ctx.demand(0).saturated().min(self.remaining);
    ctx.top_up(0, target)
  }
}

impl StageLogic for TakeLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.remaining == 0 {
      ctx.complete_stage();
    }
    Ok(())
  }

  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.pull(ctx)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    ctx.push(0, element)?;
    self.remaining -= 1;
    if self.remaining == 0 {
      ctx.complete_stage();
      return Ok(());
    }
    self.pull(ctx)
  }
}
