use alloc::boxed::Box;
use core::iter::Peekable;

use super::{
  GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
};

/// Emits the elements of a cloneable iterable; each run iterates a fresh clone.
pub(crate) struct IteratorSource<I> {
  items: I,
  kind:  StageKind,
}

impl<I> IteratorSource<I> {
  pub(crate) const fn new(items: I, kind: StageKind) -> Self {
    Self { items, kind }
  }
}

impl<I> GraphStage for IteratorSource<I>
where
  I: IntoIterator + Clone + Send + Sync + 'static,
  I::IntoIter: Send + 'static,
  I::Item: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_outlet::<I::Item>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic = IteratorSourceLogic { items: self.items.clone().into_iter().peekable(), budget: ctx.drive_budget() };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    self.kind
  }
}

struct IteratorSourceLogic<It: Iterator> {
  items:  Peekable<It>,
  budget: usize,
}

impl<It> IteratorSourceLogic<It>
where
  It: Iterator,
  It::Item: Send + 'static,
{
  fn emit(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let mut emitted = 0;
    while ctx.has_demand(0) {
      if emitted == self.budget {
        ctx.waker().wake_by_ref();
        return Ok(());
      }
      let Some(item) = self.items.next() else {
        break;
      };
      ctx.push_value(0, item)?;
      emitted += 1;
    }
    if self.items.peek().is_none() {
      ctx.complete(0);
    }
    Ok(())
  }
}

impl<It> StageLogic for IteratorSourceLogic<It>
where
  It: Iterator + Send,
  It::Item: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.items.peek().is_none() {
      ctx.complete(0);
    }
    Ok(())
  }

  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_wake(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit(ctx)
  }
}
