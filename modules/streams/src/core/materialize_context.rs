use alloc::string::String;
use core::task::Waker;

use super::CancelHandle;

/// Per-run information handed to [`GraphStage::create_logic`](super::GraphStage::create_logic).
pub struct MaterializeContext {
  stage_name:      String,
  buffer_capacity: usize,
  drive_budget:    usize,
  cancel_handle:   CancelHandle,
  waker:           Waker,
}

impl MaterializeContext {
  pub(crate) const fn new(
    stage_name: String,
    buffer_capacity: usize,
    drive_budget: usize,
    cancel_handle: CancelHandle,
    waker: Waker,
  ) -> Self {
    Self { stage_name, buffer_capacity, drive_budget, cancel_handle, waker }
  }

  /// Returns the resolved stage name.
  #[must_use]
  pub fn stage_name(&self) -> &str {
    &self.stage_name
  }

  /// Returns the inlet buffer capacity of the stage.
  #[must_use]
  pub const fn buffer_capacity(&self) -> usize {
    self.buffer_capacity
  }

  /// Returns how many elements a stage should emit before yielding.
  #[must_use]
  pub const fn drive_budget(&self) -> usize {
    self.drive_budget
  }

  /// Returns a handle cancelling this stage, to embed in its materialized value.
  #[must_use]
  pub fn cancel_handle(&self) -> CancelHandle {
    self.cancel_handle.clone()
  }

  /// Returns a waker scheduling [`StageLogic::on_wake`](super::StageLogic::on_wake) on this stage.
  #[must_use]
  pub fn waker(&self) -> Waker {
    self.waker.clone()
  }
}
