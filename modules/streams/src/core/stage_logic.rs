use super::{DynValue, StageContext, StageTermination, StreamError};

/// Processing logic of one materialized stage.
///
/// The runner calls exactly one callback at a time for a stage. Returning an error fails the
/// stage: its open outlets are failed with that error and its open inlets are cancelled.
pub trait StageLogic: Send {
  /// Called once before any other callback.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage before it processed anything.
  fn on_start(&mut self, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Ok(())
  }

  /// Called after downstream granted more demand on `outlet`.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage.
  fn on_pull(&mut self, _ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    Ok(())
  }

  /// Called when upstream delivers `element` on `inlet`.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage. Stages without inlets report a protocol violation.
  fn on_push(&mut self, _ctx: &mut StageContext<'_>, _inlet: usize, _element: DynValue) -> Result<(), StreamError> {
    Err(StreamError::ProtocolViolation { reason: "element delivered to a stage without inlet handling" })
  }

  /// Called when upstream completed `inlet`.
  ///
  /// Completes the stage once every inlet is closed.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage.
  fn on_upstream_finish(&mut self, ctx: &mut StageContext<'_>, _inlet: usize) -> Result<(), StreamError> {
    if ctx.all_inlets_closed() {
      ctx.complete_stage();
    }
    Ok(())
  }

  /// Called when upstream failed `inlet`.
  ///
  /// # Errors
  ///
  /// Propagates `error` by default, failing the stage.
  fn on_upstream_failure(
    &mut self,
    _ctx: &mut StageContext<'_>,
    _inlet: usize,
    error: StreamError,
  ) -> Result<(), StreamError> {
    Err(error)
  }

  /// Called when downstream cancelled `outlet`.
  ///
  /// Cancels upstream once every outlet is closed.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage.
  fn on_downstream_finish(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    if ctx.all_outlets_closed() {
      ctx.complete_stage();
    }
    Ok(())
  }

  /// Called after the stage's waker was woken.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage.
  fn on_wake(&mut self, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Ok(())
  }

  /// Called when the stream handle or a materialized value cancels the stage.
  ///
  /// # Errors
  ///
  /// Returns an error to fail the stage.
  fn on_shutdown(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.complete_stage();
    Ok(())
  }

  /// Called exactly once after the stage reached a terminal state.
  fn post_stop(&mut self, _termination: &StageTermination) {}
}
