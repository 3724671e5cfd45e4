use alloc::boxed::Box;
use core::{
  future::Future,
  marker::PhantomData,
  pin::Pin,
  task::{Context, Poll},
};

use super::{
  GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
};

/// Emits the values of an asynchronous producer until it yields `None`.
///
/// The producer future is polled with the stage waker, so a pending future resumes the stage
/// once it is woken.
pub(crate) struct AsyncSource<F, Out> {
  producer: F,
  _pd:      PhantomData<fn() -> Out>,
}

impl<F, Out> AsyncSource<F, Out> {
  pub(crate) const fn new(producer: F) -> Self {
    Self { producer, _pd: PhantomData }
  }
}

impl<F, Fut, Out> GraphStage for AsyncSource<F, Out>
where
  F: FnMut() -> Fut + Clone + Send + Sync + 'static,
  Fut: Future<Output = Option<Out>> + Send + 'static,
  Out: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_outlet::<Out>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic = AsyncSourceLogic { producer: self.producer.clone(), pending: None, budget: ctx.drive_budget() };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::SourceAsync
  }
}

struct AsyncSourceLogic<F, Fut> {
  producer: F,
  pending:  Option<Pin<Box<Fut>>>,
  budget:   usize,
}

impl<F, Fut, Out> AsyncSourceLogic<F, Fut>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Option<Out>>,
  Out: Send + 'static,
{
  fn emit(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let mut emitted = 0;
    while ctx.has_demand(0) {
      if emitted == self.budget {
        ctx.waker().wake_by_ref();
        return Ok(());
      }
      let future = self.pending.get_or_insert_with(|| Box::pin((self.producer)()));
      let mut cx = Context::from_waker(ctx.waker());
      match future.as_mut().poll(&mut cx) {
        | Poll::Ready(Some(value)) => {
          self.pending = None;
          ctx.push_value(0, value)?;
          emitted += 1;
        },
        | Poll::Ready(None) => {
          self.pending = None;
          ctx.complete(0);
          return Ok(());
        },
        | Poll::Pending => return Ok(()),
      }
    }
    Ok(())
  }
}

impl<F, Fut, Out> StageLogic for AsyncSourceLogic<F, Fut>
where
  F: FnMut() -> Fut + Send,
  Fut: Future<Output = Option<Out>> + Send,
  Out: Send + 'static,
{
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_wake(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit(ctx)
  }
}
