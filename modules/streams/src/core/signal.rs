use super::{DynValue, StreamError};

/// Signal delivered to a stage.
///
/// Port indices are local to the receiving stage: `outlet` names one of its outlets, `inlet` one
/// of its inlets.
pub enum Signal {
  /// Delivered once before any other signal.
  Start,
  /// Downstream grants `n` more elements on `outlet`.
  Request {
    /// Outlet receiving the demand.
    outlet: usize,
    /// Number of additional elements.
    n:      u64,
  },
  /// Downstream will not request anything more on `outlet`.
  Cancel {
    /// Outlet being cancelled.
    outlet: usize,
  },
  /// Upstream delivers one element on `inlet`.
  Push {
    /// Inlet receiving the element.
    inlet:   usize,
    /// Type-erased element.
    element: DynValue,
  },
  /// Upstream finished `inlet` normally.
  Complete {
    /// Finished inlet.
    inlet: usize,
  },
  /// Upstream terminated `inlet` with an error.
  Fail {
    /// Failed inlet.
    inlet: usize,
    /// Failure cause.
    error: StreamError,
  },
  /// The stage asked to be scheduled again.
  Wake,
  /// The stream handle or a materialized value asked the stage to stop.
  Shutdown,
}

impl core::fmt::Debug for Signal {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      | Self::Start => f.write_str("Start"),
      | Self::Request { outlet, n } => f.debug_struct("Request").field("outlet", outlet).field("n", n).finish(),
      | Self::Cancel { outlet } => f.debug_struct("Cancel").field("outlet", outlet).finish(),
      | Self::Push { inlet, .. } => f.debug_struct("Push").field("inlet", inlet).finish_non_exhaustive(),
      | Self::Complete { inlet } => f.debug_struct("Complete").field("inlet", inlet).finish(),
      | Self::Fail { inlet, error } => f.debug_struct("Fail").field("inlet", inlet).field("error", error).finish(),
      | Self::Wake => f.write_str("Wake"),
      | Self::Shutdown => f.write_str("Shutdown"),
    }
  }
}
