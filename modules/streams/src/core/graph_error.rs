//! Graph construction errors.

use alloc::string::String;

/// Errors detected while building a graph description.
///
/// These are reported before materialization; an inconsistent graph never runs.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
  /// The port does not belong to a stage of this builder.
  #[error("port refers to a stage that is not part of this graph")]
  UnknownStage,
  /// The port already takes part in an edge.
  #[error("port of stage `{stage}` is already connected")]
  PortAlreadyConnected {
    /// Name of the stage owning the port.
    stage: String,
  },
  /// The connected ports carry different element types.
  #[error("element types of `{upstream}` and `{downstream}` do not match")]
  TypeMismatch {
    /// Name of the upstream stage.
    upstream:   String,
    /// Name of the downstream stage.
    downstream: String,
  },
  /// A non-boundary port was left unconnected.
  #[error("port {slot} of stage `{stage}` is not connected")]
  UnconnectedPort {
    /// Name of the stage owning the port.
    stage: String,
    /// Port slot within its stage.
    slot:  usize,
  },
  /// A port was nominated as boundary but is already connected or missing.
  #[error("boundary port is not an open port of this graph")]
  UnexpectedBoundary,
  /// A cycle does not pass through a buffering stage.
  #[error("cycle without a buffering stage")]
  UnbufferedCycle,
  /// A constructor argument is out of range.
  #[error("invalid argument `{name}` = {value}: {reason}")]
  InvalidArgument {
    /// Argument name.
    name:   &'static str,
    /// Supplied value.
    value:  usize,
    /// Why the value is rejected.
    reason: &'static str,
  },
  /// A custom stage declares ports that do not fit the requested variant.
  #[error("stage shape does not match: expected {expected_inlets} inlets and {expected_outlets} outlets")]
  ShapeMismatch {
    /// Inlets expected by the variant.
    expected_inlets:  usize,
    /// Outlets expected by the variant.
    expected_outlets: usize,
  },
}

/// Validates that the provided argument is greater than zero.
///
/// # Errors
///
/// Returns [`GraphError::InvalidArgument`] when `value == 0`.
pub(crate) const fn validate_positive_argument(name: &'static str, value: usize) -> Result<usize, GraphError> {
  if value == 0 {
    return Err(GraphError::InvalidArgument { name, value, reason: "must be greater than zero" });
  }
  Ok(value)
}
