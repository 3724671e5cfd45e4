use super::{DynValue, StreamError};

/// Signal emitted by a stage, addressed by its own port index.
///
/// The runner translates each one into a [`Signal`](super::Signal) for the peer port.
pub(crate) enum OutboundSignal {
  Request { inlet: usize, n: u64 },
  Cancel { inlet: usize },
  Push { outlet: usize, element: DynValue },
  Complete { outlet: usize },
  Fail { outlet: usize, error: StreamError },
}
