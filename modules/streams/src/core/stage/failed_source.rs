use alloc::boxed::Box;
use core::marker::PhantomData;

use super::{
  GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StreamError, StreamNotUsed,
};

/// Fails with a fixed error as soon as it starts.
pub(crate) struct FailedSource<Out> {
  error: StreamError,
  _pd:   PhantomData<fn() -> Out>,
}

impl<Out> FailedSource<Out> {
  pub(crate) const fn new(error: StreamError) -> Self {
    Self { error, _pd: PhantomData }
  }
}

impl<Out> GraphStage for FailedSource<Out>
where
  Out: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    StageShape::new().with_outlet::<Out>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    Ok((Box::new(FailedSourceLogic { error: self.error.clone() }), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::SourceFailed
  }
}

struct FailedSourceLogic {
  error: StreamError,
}

impl StageLogic for FailedSourceLogic {
  fn on_start(&mut self, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Err(self.error.clone())
  }
}
