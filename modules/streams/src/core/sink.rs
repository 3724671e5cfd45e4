//! Blueprint with exactly one open inlet.

#[cfg(test)]
mod tests;

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::{
  Attributes, GraphComponent, GraphError, GraphStage, Inlet, PortId, PortType, SinkShape, StageKind, StreamCompletion,
  StreamDone, StreamGraph,
  stage::{FoldSink, ForeachSink, HeadSink},
  stage_descriptor::StageDescriptor,
};

/// Immutable blueprint consuming elements of type `In` and materializing `Mat`.
pub struct Sink<In, Mat> {
  graph: StreamGraph,
  _pd:   PhantomData<fn(In) -> Mat>,
}

impl<In, Mat> Clone for Sink<In, Mat> {
  fn clone(&self) -> Self {
    Self { graph: self.graph.clone(), _pd: PhantomData }
  }
}

impl<In> Sink<In, StreamCompletion<StreamDone>>
where
  In: Send + 'static,
{
  /// Consumes and discards every element.
  #[must_use]
  pub fn ignore() -> Self {
    Self::from_stage(ForeachSink::new(drop::<In>, StageKind::SinkIgnore))
  }

  /// Applies `func` to every element.
  #[must_use]
  pub fn foreach<F>(func: F) -> Self
  where
    F: FnMut(In) + Clone + Send + Sync + 'static, {
    Self::from_stage(ForeachSink::new(func, StageKind::SinkForeach))
  }
}

impl<In> Sink<In, StreamCompletion<In>>
where
  In: Send + 'static,
{
  /// Resolves with the first element and cancels upstream.
  ///
  /// Resolves with [`StreamError::EmptyStream`](super::StreamError::EmptyStream) when upstream
  /// completes without elements.
  #[must_use]
  pub fn head() -> Self {
    Self::from_stage(HeadSink::<In>::new())
  }
}

impl<In> Sink<In, StreamCompletion<Vec<In>>>
where
  In: Clone + Send + Sync + 'static,
{
  /// Collects every element and resolves with them on completion.
  #[must_use]
  pub fn collect() -> Self {
    Self::from_stage(FoldSink::new(Vec::new(), push_element::<In>, StageKind::SinkCollect))
  }
}

fn push_element<T>(mut items: Vec<T>, item: T) -> Vec<T> {
  items.push(item);
  items
}

impl<In, Acc> Sink<In, StreamCompletion<Acc>>
where
  In: Send + 'static,
  Acc: Clone + Send + Sync + 'static,
{
  /// Folds every element into `zero` with `func` and resolves with the result on completion.
  #[must_use]
  pub fn fold<F>(zero: Acc, func: F) -> Self
  where
    F: FnMut(Acc, In) -> Acc + Clone + Send + Sync + 'static, {
    Self::from_stage(FoldSink::new(zero, func, StageKind::SinkFold))
  }
}

impl<In, Mat> Sink<In, Mat>
where
  In: Send + 'static,
  Mat: Send + 'static,
{
  pub(crate) const fn from_graph(graph: StreamGraph) -> Self {
    Self { graph, _pd: PhantomData }
  }

  fn from_stage<G>(stage: G) -> Self
  where
    G: GraphStage<Mat = Mat>, {
    Self::from_graph(StreamGraph::from_stage(StageDescriptor::new(stage)))
  }

  /// Wraps a custom stage with one inlet carrying `In` and no outlets.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the stage declares other ports.
  pub fn from_graph_stage<G>(stage: G) -> Result<Self, GraphError>
  where
    G: GraphStage<Mat = Mat>, {
    stage.shape().ensure(&[PortType::of::<In>()], &[])?;
    Ok(Self::from_stage(stage))
  }

  /// Transforms the materialized value of every future run.
  #[must_use]
  pub fn map_materialized_value<Mat2, F>(self, func: F) -> Sink<In, Mat2>
  where
    Mat2: Send + 'static,
    F: Fn(Mat) -> Mat2 + Send + Sync + 'static, {
    Sink::from_graph(self.graph.map_mat(func))
  }

  /// Adds attributes to every stage; attributes set closer to a stage win.
  #[must_use]
  pub fn with_attributes(self, attributes: Attributes) -> Self {
    Self::from_graph(self.graph.with_attributes(&attributes))
  }

  /// Names the stages of this sink.
  #[must_use]
  pub fn named(self, name: &str) -> Self {
    self.with_attributes(Attributes::named(name))
  }

  /// Returns the number of stages.
  #[must_use]
  pub fn stage_count(&self) -> usize {
    self.graph.stage_count()
  }
}

impl<In, Mat> GraphComponent for Sink<In, Mat>
where
  In: Send + 'static,
  Mat: Send + 'static,
{
  type Mat = Mat;
  type Shape = SinkShape<In>;

  fn into_stream_graph(self) -> StreamGraph {
    self.graph
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    match (inlets, outlets) {
      | ([inlet], []) => Ok(SinkShape::new(Inlet::from_id(*inlet))),
      | _ => Err(GraphError::ShapeMismatch { expected_inlets: 1, expected_outlets: 0 }),
    }
  }
}
