use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StageTermination,
  StreamCompletion, StreamError, downcast_value, resolve,
};

/// Folds every element into an accumulator and resolves with it on completion.
pub(crate) struct FoldSink<Acc, F, In> {
  zero: Acc,
  func: F,
  kind: StageKind,
  _pd:  PhantomData<fn(In)>,
}

impl<Acc, F, In> FoldSink<Acc, F, In> {
  pub(crate) const fn new(zero: Acc, func: F, kind: StageKind) -> Self {
    Self { zero, func, kind, _pd: PhantomData }
  }
}

impl<Acc, F, In> GraphStage for FoldSink<Acc, F, In>
where
  Acc: Clone + Send + Sync + 'static,
  F: FnMut(Acc, In) -> Acc + Clone + Send + Sync + 'static,
  In: Send + 'static,
{
  type Mat = StreamCompletion<Acc>;

  fn shape(&self) -> StageShape {
    StageShape::new().with_inlet::<In>()
  }

  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let completion = StreamCompletion::new().with_canceller(ctx.cancel_handle());
    let logic: FoldLogic<Acc, F, In> = FoldLogic {
      acc:        Some(self.zero.clone()),
      func:       self.func.clone(),
      completion: completion.clone(),
      _pd:        PhantomData,
    };
    Ok((Box::new(logic), completion))
  }

  fn kind(&self) -> StageKind {
    self.kind
  }
}

struct FoldLogic<Acc, F, In> {
  acc:        Option<Acc>,
  func:       F,
  completion: StreamCompletion<Acc>,
  _pd:        PhantomData<fn(In)>,
}

impl<Acc, F, In> StageLogic for FoldLogic<Acc, F, In>
where
  Acc: Send,
  F: FnMut(Acc, In) -> Acc + Send,
  In: Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.top_up(0, ctx.buffer_capacity() as u64)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = downcast_value::<In>(element)?;
    if let Some(acc) = self.acc.take() {
      self.acc = Some((self.func)(acc, value));
    }
    ctx.top_up(0, ctx.buffer_capacity() as u64)
  }

  fn post_stop(&mut self, termination: &StageTermination) {
    let acc = self.acc.take();
    match acc {
      | Some(acc) => resolve(&self.completion, termination, || acc),
      | None => {
        self.completion.complete(Err(StreamError::AbruptTermination));
      },
    }
  }
}
