use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamBuffer,
  StreamError, StreamNotUsed,
};

/// Keeps up to its inlet capacity of elements in flight, independent of downstream demand.
pub(crate) struct BufferFlow<T> {
  _pd: PhantomData<fn(T)>,
}

impl<T> BufferFlow<T> {
  pub(crate) const fn new() -> Self {
    Self { _pd: PhantomData }
  }
}

impl<T> GraphStage for BufferFlow<T>
where
  T: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<T>().with_outlet::<T>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic = BufferLogic { buffer: StreamBuffer::new(ctx.buffer_capacity()), upstream_done: false };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::FlowBuffer
  }

  fn is_buffering(&self) -> bool {
    true
  }
}

struct BufferLogic {
  buffer:        StreamBuffer<DynValue>,
  upstream_done: bool,
}

impl BufferLogic {
  fn drain(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    while ctx.has_demand(0) {
      let Some(element) = self.buffer.poll() else {
        break;
      };
      ctx.push(0, element)?;
    }
    if self.upstream_done {
      if self.buffer.is_empty() {
        ctx.complete(0);
      }
      return Ok(());
    }
    let target = self.buffer.remaining_capacity() as u64;
    ctx.top_up(0, target)
  }
}

impl StageLogic for BufferLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.drain(ctx)
  }

  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.drain(ctx)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    self.buffer.offer(element)?;
    self.drain(ctx)
  }

  fn on_upstream_finish(&mut self, ctx: &mut StageContext<'_>, _inlet: usize) -> Result<(), StreamError> {
    self.upstream_done = true;
    self.drain(ctx)
  }
}
