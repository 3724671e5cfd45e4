use alloc::boxed::Box;

use super::{GraphStage, MaterializeContext, StageLogic, StreamError, mat_tree::DynMat};

/// Object-safe view of a [`GraphStage`] with an erased materialized value.
pub(crate) trait StageFactory: Send + Sync {
  fn instantiate(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, DynMat), StreamError>;
}

impl<G> StageFactory for G
where
  G: GraphStage,
{
  fn instantiate(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, DynMat), StreamError> {
    let (logic, mat) = self.create_logic(ctx)?;
    Ok((logic, Box::new(mat)))
  }
}
