/// Materialized value of stages that expose nothing to the caller.
///
/// Built-in sources and flows materialize this, and [`KeepNone`](super::KeepNone) yields it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamNotUsed;

impl StreamNotUsed {
  /// Returns the marker.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}
