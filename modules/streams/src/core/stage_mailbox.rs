use super::Signal;

/// Inbound signal queue of one stage.
///
/// Signals posted by one sender are delivered in posting order.
pub(crate) trait StageMailbox: Send + Sync {
  /// Enqueues `signal`; returns `false` once the stage stopped receiving.
  fn post(&self, signal: Signal) -> bool;
}
