//! Blueprint with exactly one open outlet.


use core::{future::Future, marker::PhantomData};

use super::{
  Attributes, Flow, GraphComponent, GraphError, GraphStage, KeepLeft, KeepRight, MatCombineRule, Materialized,
  Materializer, Outlet, PortId, PortType, RunnableGraph, Sink, SourceShape, StageKind, StreamError, StreamGraph,
  StreamNotUsed,
  stage::{AsyncSource, FailedSource, IteratorSource},
  stage_descriptor::StageDescriptor,
};

/// Immutable blueprint emitting elements of type `Out` and materializing `Mat`.
pub struct Source<Out, Mat> {
  graph: StreamGraph,
  _pd:   PhantomData<fn() -> (Out, Mat)>,
}

impl<Out, Mat> Clone for Source<Out, Mat> {
  fn clone(&self) -> Self {
    Self { graph: self.graph.clone(), _pd: PhantomData }
  }
}

impl<Out> Source<Out, StreamNotUsed>
where
  Out: Send + 'static,
{
  /// Emits the elements of `items`; every run iterates a fresh clone.
  #[must_use]
  pub fn from_iterator<I>(items: I) -> Self
  where
    I: IntoIterator<Item = Out> + Clone + Send + Sync + 'static,
    I::IntoIter: Send + 'static, {
    Self::from_stage(IteratorSource::new(items, StageKind::SourceIterator))
  }

  /// Emits `value` once, then completes.
  #[must_use]
  pub fn single(value: Out) -> Self
  where
    Out: Clone + Sync, {
    Self::from_stage(IteratorSource::new(core::iter::once(value), StageKind::SourceSingle))
  }

  /// Completes without emitting.
  #[must_use]
  pub fn empty() -> Self {
    Self::from_stage(IteratorSource::new(core::iter::empty::<Out>(), StageKind::SourceEmpty))
  }

  /// Emits clones of `value` until cancelled.
  #[must_use]
  pub fn repeat(value: Out) -> Self
  where
    Out: Clone + Sync, {
    Self::from_stage(IteratorSource::new(core::iter::repeat(value), StageKind::SourceRepeat))
  }

  /// Fails with `error` as soon as the stream starts.
  #[must_use]
  pub fn failed(error: StreamError) -> Self {
    Self::from_stage(FailedSource::<Out>::new(error))
  }

  /// Emits the values produced by `producer` until it resolves to `None`.
  ///
  /// Each run starts from a fresh clone of `producer`.
  #[must_use]
  pub fn from_async<F, Fut>(producer: F) -> Self
  where
    F: FnMut() -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Option<Out>> + Send + 'static, {
    Self::from_stage(AsyncSource::<F, Out>::new(producer))
  }
}

impl<Out, Mat> Source<Out, Mat>
where
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

  /// Wraps a custom stage with no inlets and one outlet carrying `Out`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the stage declares other ports.
  pub fn from_graph_stage<G>(stage: G) -> Result<Self, GraphError>
  where
    G: GraphStage<Mat = Mat>, {
    stage.shape().ensure(&[], &[PortType::of::<Out>()])?;
    Ok(Self::from_stage(stage))
  }

  /// Attaches `flow` downstream, keeping this source's materialized value.
  #[must_use]
  pub fn via<Out2, Mat2>(self, flow: Flow<Out, Out2, Mat2>) -> Source<Out2, Mat>
  where
    Out2: Send + 'static,
    Mat2: Send + 'static, {
    self.via_mat(flow, KeepLeft)
  }

  /// Attaches `flow` downstream and combines the materialized values with `rule`.
  #[must_use]
  pub fn via_mat<Out2, Mat2, C>(self, flow: Flow<Out, Out2, Mat2>, rule: C) -> Source<Out2, C::Out>
  where
    Out2: Send + 'static,
    Mat2: Send + 'static,
    C: MatCombineRule<Mat, Mat2>,
    C::Out: Send + 'static, {
    Source::from_graph(self.graph.fuse::<Mat, Mat2, C>(flow.into_stream_graph(), rule))
  }

  /// Connects `sink`, keeping this source's materialized value.
  #[must_use]
  pub fn to<Mat2>(self, sink: Sink<Out, Mat2>) -> RunnableGraph<Mat>
  where
    Mat2: Send + 'static, {
    self.to_mat(sink, KeepLeft)
  }

  /// Connects `sink` and combines the materialized values with `rule`.
  #[must_use]
  pub fn to_mat<Mat2, C>(self, sink: Sink<Out, Mat2>, rule: C) -> RunnableGraph<C::Out>
  where
    Mat2: Send + 'static,
    C: MatCombineRule<Mat, Mat2>,
    C::Out: Send + 'static, {
    RunnableGraph::new(self.graph.fuse::<Mat, Mat2, C>(sink.into_stream_graph(), rule))
  }

  /// Connects `sink` and materializes the graph, returning the sink's materialized value.
  ///
  /// # Errors
  ///
  /// Returns the materializer's error.
  pub fn run_with<Mat2, M>(self, sink: Sink<Out, Mat2>, materializer: &mut M) -> Result<Materialized<Mat2>, StreamError>
  where
    Mat2: Send + 'static,
    M: Materializer, {
    self.to_mat(sink, KeepRight).run(materializer)
  }

  /// Maps every element with `func`.
  #[must_use]
  pub fn map<Out2, F>(self, func: F) -> Source<Out2, Mat>
  where
    Out2: Send + 'static,
    F: FnMut(Out) -> Out2 + Clone + Send + Sync + 'static, {
    self.via(Flow::new().map(func))
  }

  /// Keeps the elements accepted by `predicate`.
  #[must_use]
  pub fn filter<F>(self, predicate: F) -> Self
  where
    F: FnMut(&Out) -> bool + Clone + Send + Sync + 'static, {
    self.via(Flow::new().filter(predicate))
  }

  /// Maps every element with a fallible `func`; the first error fails the stream.
  #[must_use]
  pub fn try_map<Out2, F>(self, func: F) -> Source<Out2, Mat>
  where
    Out2: Send + 'static,
    F: FnMut(Out) -> Result<Out2, StreamError> + Clone + Send + Sync + 'static, {
    self.via(Flow::new().try_map(func))
  }

  /// Emits at most `limit` elements.
  #[must_use]
  pub fn take(self, limit: u64) -> Self {
    self.via(Flow::new().take(limit))
  }

  /// Requests up to `capacity` elements ahead of downstream demand.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::InvalidArgument`] when `capacity` is zero.
  pub fn buffer(self, capacity: usize) -> Result<Self, GraphError> {
    Ok(self.via(Flow::new().buffer(capacity)?))
  }

  /// Transforms the materialized value of every future run.
  #[must_use]
  pub fn map_materialized_value<Mat2, F>(self, func: F) -> Source<Out, Mat2>
  where
    Mat2: Send + 'static,
    F: Fn(Mat) -> Mat2 + Send + Sync + 'static, {
    Source::from_graph(self.graph.map_mat(func))
  }

  /// Adds attributes to every stage; attributes set closer to a stage win.
  #[must_use]
  pub fn with_attributes(self, attributes: Attributes) -> Self {
    Self::from_graph(self.graph.with_attributes(&attributes))
  }

  /// Names the stages of this source.
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

impl<Out, Mat> GraphComponent for Source<Out, Mat>
where
  Out: Send + 'static,
  Mat: Send + 'static,
{
  type Mat = Mat;
  type Shape = SourceShape<Out>;

  fn into_stream_graph(self) -> StreamGraph {
    self.graph
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    match (inlets, outlets) {
      | ([], [outlet]) => Ok(SourceShape::new(Outlet::from_id(*outlet))),
      | _ => Err(GraphError::ShapeMismatch { expected_inlets: 0, expected_outlets: 1 }),
    }
  }
}
