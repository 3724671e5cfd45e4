//! Blueprint with exactly one open inlet and one open outlet.


use core::marker::PhantomData;

use super::{
  Attributes, GraphComponent, GraphError, GraphStage, Inlet, KeepLeft, MatCombineRule, Outlet, PortId, PortType,
  FlowShape, Sink, StageKind, StreamError, StreamGraph, StreamNotUsed,
  graph_error::validate_positive_argument,
  stage::{BufferFlow, FilterFlow, MapFlow, TakeFlow, TryMapFlow},
  stage_descriptor::StageDescriptor,
};

/// Immutable blueprint transforming `In` elements into `Out` elements and materializing `Mat`.
pub struct Flow<In, Out, Mat> {
  graph: StreamGraph,
  _pd:   PhantomData<fn(In) -> (Out, Mat)>,
}

impl<In, Out, Mat> Clone for Flow<In, Out, Mat> {
  fn clone(&self) -> Self {
    Self { graph: self.graph.clone(), _pd: PhantomData }
  }
}

impl<T> Flow<T, T, StreamNotUsed>
where
  T: Send + 'static,
{
  /// Creates a flow passing elements through unchanged.
  #[must_use]
  pub fn new() -> Self {
    Self::from_stage(MapFlow::new(identity::<T>, StageKind::FlowIdentity))
  }
}

impl<T> Default for Flow<T, T, StreamNotUsed>
where
  T: Send + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

fn identity<T>(value: T) -> T {
  value
}

impl<In, Out, Mat> Flow<In, Out, Mat>
where
  In: Send + 'static,
  Out: Send + 'static,
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

  /// Wraps a custom stage with one inlet carrying `In` and one outlet carrying `Out`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the stage declares other ports.
  pub fn from_graph_stage<G>(stage: G) -> Result<Self, GraphError>
  where
    G: GraphStage<Mat = Mat>, {
    stage.shape().ensure(&[PortType::of::<In>()], &[PortType::of::<Out>()])?;
    Ok(Self::from_stage(stage))
  }

  /// Attaches `flow` downstream, keeping this flow's materialized value.
  #[must_use]
  pub fn via<Out2, Mat2>(self, flow: Flow<Out, Out2, Mat2>) -> Flow<In, Out2, Mat>
  where
    Out2: Send + 'static,
    Mat2: Send + 'static, {
    self.via_mat(flow, KeepLeft)
  }

  /// Attaches `flow` downstream and combines the materialized values with `rule`.
  #[must_use]
  pub fn via_mat<Out2, Mat2, C>(self, flow: Flow<Out, Out2, Mat2>, rule: C) -> Flow<In, Out2, C::Out>
  where
    Out2: Send + 'static,
    Mat2: Send + 'static,
    C: MatCombineRule<Mat, Mat2>,
    C::Out: Send + 'static, {
    Flow::from_graph(self.graph.fuse::<Mat, Mat2, C>(flow.graph, rule))
  }

  /// Connects `sink`, keeping this flow's materialized value.
  #[must_use]
  pub fn to<Mat2>(self, sink: Sink<Out, Mat2>) -> Sink<In, Mat>
  where
    Mat2: Send + 'static, {
    self.to_mat(sink, KeepLeft)
  }

  /// Connects `sink` and combines the materialized values with `rule`.
  #[must_use]
  pub fn to_mat<Mat2, C>(self, sink: Sink<Out, Mat2>, rule: C) -> Sink<In, C::Out>
  where
    Mat2: Send + 'static,
    C: MatCombineRule<Mat, Mat2>,
    C::Out: Send + 'static, {
    Sink::from_graph(self.graph.fuse::<Mat, Mat2, C>(sink.into_stream_graph(), rule))
  }

  /// Maps every element with `func`.
  #[must_use]
  pub fn map<Out2, F>(self, func: F) -> Flow<In, Out2, Mat>
  where
    Out2: Send + 'static,
    F: FnMut(Out) -> Out2 + Clone + Send + Sync + 'static, {
    self.via(Flow::from_stage(MapFlow::new(func, StageKind::FlowMap)))
  }

  /// Keeps the elements accepted by `predicate`.
  #[must_use]
  pub fn filter<F>(self, predicate: F) -> Self
  where
    F: FnMut(&Out) -> bool + Clone + Send + Sync + 'static, {
    self.via(Flow::from_stage(FilterFlow::new(predicate)))
  }

  /// Maps every element with a fallible `func`; the first error fails the stream.
  #[must_use]
  pub fn try_map<Out2, F>(self, func: F) -> Flow<In, Out2, Mat>
  where
    Out2: Send + 'static,
    F: FnMut(Out) -> Result<Out2, StreamError> + Clone + Send + Sync + 'static, {
    self.via(Flow::from_stage(TryMapFlow::new(func)))
  }

  /// Emits at most `limit` elements, then completes and cancels upstream.
  #[must_use]
  pub fn take(self, limit: u64) -> Self {
    self.via(Flow::from_stage(TakeFlow::<Out>::new(limit)))
  }

  /// Requests up to `capacity` elements ahead of downstream demand.
  ///
  /// A buffer also makes a cycle in a [`GraphBuilder`](super::GraphBuilder) legal.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::InvalidArgument`] when `capacity` is zero.
  pub fn buffer(self, capacity: usize) -> Result<Self, GraphError> {
    let capacity = validate_positive_argument("capacity", capacity)?;
    let buffer = Flow::from_stage(BufferFlow::<Out>::new()).with_attributes(Attributes::input_buffer(capacity));
    Ok(self.via(buffer))
  }

  /// Transforms the materialized value of every future run.
  #[must_use]
  pub fn map_materialized_value<Mat2, F>(self, func: F) -> Flow<In, Out, Mat2>
  where
    Mat2: Send + 'static,
    F: Fn(Mat) -> Mat2 + Send + Sync + 'static, {
    Flow::from_graph(self.graph.map_mat(func))
  }

  /// Adds attributes to every stage; attributes set closer to a stage win.
  #[must_use]
  pub fn with_attributes(self, attributes: Attributes) -> Self {
    Self::from_graph(self.graph.with_attributes(&attributes))
  }

  /// Names the stages of this flow.
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

impl<In, Out, Mat> GraphComponent for Flow<In, Out, Mat>
where
  In: Send + 'static,
  Out: Send + 'static,
  Mat: Send + 'static,
{
  type Mat = Mat;
  type Shape = FlowShape<In, Out>;

  fn into_stream_graph(self) -> StreamGraph {
    self.graph
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    match (inlets, outlets) {
      | ([inlet], [outlet]) => Ok(FlowShape::new(Inlet::from_id(*inlet), Outlet::from_id(*outlet))),
      | _ => Err(GraphError::ShapeMismatch { expected_inlets: 1, expected_outlets: 1 }),
    }
  }
}
