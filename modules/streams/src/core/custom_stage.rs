use super::{
  GraphComponent, GraphError, GraphStage, PortId, PortShape, StreamGraph, stage_descriptor::StageDescriptor,
};

/// Adds a [`GraphStage`] with any number of ports to a [`GraphBuilder`](super::GraphBuilder).
pub struct CustomStage<G> {
  stage: G,
}

impl<G> CustomStage<G>
where
  G: GraphStage,
{
  /// Wraps `stage`.
  #[must_use]
  pub const fn new(stage: G) -> Self {
    Self { stage }
  }
}

impl<G> GraphComponent for CustomStage<G>
where
  G: GraphStage,
{
  type Mat = G::Mat;
  type Shape = PortShape;

  fn into_stream_graph(self) -> StreamGraph {
    StreamGraph::from_stage(StageDescriptor::new(self.stage))
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    Ok(PortShape::new(inlets.to_vec(), outlets.to_vec()))
  }
}
