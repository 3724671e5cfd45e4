use alloc::boxed::Box;

use super::{MaterializeContext, StageKind, StageLogic, StageShape, StreamError};

/// Blueprint of a stage: its ports and a factory for fresh logic.
///
/// [`Self::create_logic`] runs once per materialization, so every run owns independent state and
/// an independent materialized value.
pub trait GraphStage: Send + Sync + 'static {
  /// Materialized value produced per run.
  type Mat: Send + 'static;

  /// Returns the port types of the stage.
  fn shape(&self) -> StageShape;

  /// Creates the logic and materialized value for one run.
  ///
  /// # Errors
  ///
  /// Returns an error when the stage cannot be instantiated; materialization then fails.
  fn create_logic(&self, ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError>;

  /// Returns the stage kind used for naming and diagnostics.
  fn kind(&self) -> StageKind {
    StageKind::Custom
  }

  /// Returns `true` when the stage decouples its inlet from its outlet, allowing it on a cycle.
  fn is_buffering(&self) -> bool {
    false
  }
}
