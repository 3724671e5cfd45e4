use super::DemandTracker;

/// Per-outlet bookkeeping owned by a stage runner.
#[derive(Debug, Clone)]
pub(crate) struct OutletState {
  pub(crate) demand: DemandTracker,
  pub(crate) closed: bool,
}

impl OutletState {
  pub(crate) const fn new() -> Self {
    Self { demand: DemandTracker::new(), closed: false }
  }
}
