use super::{GraphError, PortId, StreamGraph};

/// Blueprint that can be added to a [`GraphBuilder`](super::GraphBuilder).
pub trait GraphComponent {
  /// Materialized value of the component.
  type Mat: Send + 'static;
  /// Port handles returned when the component is added.
  type Shape;

  /// Returns the type-erased graph of the component.
  fn into_stream_graph(self) -> StreamGraph;

  /// Builds the shape from the component's boundary ports, in declaration order.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the port counts do not fit the shape.
  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError>;
}
