/// Status of one inlet as seen by its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InletStatus {
  Open,
  Completed,
  Cancelled,
  Failed,
}

/// Per-inlet bookkeeping owned by a stage runner.
#[derive(Debug, Clone)]
pub(crate) struct InletState {
  pub(crate) outstanding: u64,
  pub(crate) status:      InletStatus,
}

impl InletState {
  pub(crate) const fn new() -> Self {
    Self { outstanding: 0, status: InletStatus::Open }
  }

  pub(crate) const fn is_open(&self) -> bool {
    matches!(self.status, InletStatus::Open)
  }
}
