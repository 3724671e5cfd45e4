//! Builder for graphs with arbitrary topology.

#[cfg(test)]
mod tests;

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::{
  Flow, GraphComponent, GraphError, Inlet, KeepLeft, MatCombineRule, Outlet, PortId, RunnableGraph, Sink, Source,
  StreamGraph, StreamNotUsed, stream_graph::PortAddr,
};

/// Assembles components into a graph and connects their ports explicitly.
///
/// Ports handed out by one builder are only accepted by that builder. The builder carries the
/// materialized value selected so far; [`GraphBuilder::add`] keeps it, [`GraphBuilder::import_mat`]
/// combines it with the added component's value.
pub struct GraphBuilder<Mat> {
  token: u64,
  graph: StreamGraph,
  _pd:   PhantomData<fn() -> Mat>,
}

impl GraphBuilder<StreamNotUsed> {
  /// Creates an empty builder materializing [`StreamNotUsed`].
  #[must_use]
  pub fn new() -> Self {
    Self { token: PortId::next_token(), graph: StreamGraph::empty(), _pd: PhantomData }
  }
}

impl Default for GraphBuilder<StreamNotUsed> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Mat> GraphBuilder<Mat>
where
  Mat: Send + 'static,
{
  /// Adds `component`, keeping the builder's materialized value, and returns its ports.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the component's open ports do not fit its shape.
  pub fn add<C>(&mut self, component: C) -> Result<C::Shape, GraphError>
  where
    C: GraphComponent, {
    let other = component.into_stream_graph();
    let shape = self.shape_of::<C>(&other)?;
    let graph = core::mem::replace(&mut self.graph, StreamGraph::empty());
    let (graph, _) = graph.compose::<Mat, C::Mat, KeepLeft>(other, KeepLeft);
    self.graph = graph;
    Ok(shape)
  }

  /// Adds `component` and combines its materialized value with the builder's using `rule`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::ShapeMismatch`] when the component's open ports do not fit its shape.
  pub fn import_mat<C, R>(self, component: C, rule: R) -> Result<(GraphBuilder<R::Out>, C::Shape), GraphError>
  where
    C: GraphComponent,
    R: MatCombineRule<Mat, C::Mat>,
    R::Out: Send + 'static, {
    let other = component.into_stream_graph();
    let shape = self.shape_of::<C>(&other)?;
    let (graph, _) = self.graph.compose::<Mat, C::Mat, R>(other, rule);
    Ok((GraphBuilder { token: self.token, graph, _pd: PhantomData }, shape))
  }

  /// Connects `outlet` to `inlet`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnknownStage`] for ports of another builder and
  /// [`GraphError::PortAlreadyConnected`] when either port already has an edge.
  pub fn connect<T>(&mut self, outlet: Outlet<T>, inlet: Inlet<T>) -> Result<(), GraphError> {
    self.connect_ports(outlet.id(), inlet.id())
  }

  /// Connects two untyped ports, checking the element types at run time.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnknownStage`] for ports of another builder,
  /// [`GraphError::PortAlreadyConnected`] when either port already has an edge and
  /// [`GraphError::TypeMismatch`] when the element types differ.
  pub fn connect_ports(&mut self, outlet: PortId, inlet: PortId) -> Result<(), GraphError> {
    let from = self.resolve(outlet)?;
    let to = self.resolve(inlet)?;
    self.graph.connect(from, to)
  }

  /// Returns the number of stages added so far.
  #[must_use]
  pub fn stage_count(&self) -> usize {
    self.graph.stage_count()
  }

  /// Finishes a graph without open ports.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnconnectedPort`] when a port stays open and
  /// [`GraphError::UnbufferedCycle`] when a cycle lacks a buffering stage.
  pub fn build_closed(self) -> Result<RunnableGraph<Mat>, GraphError> {
    let graph = self.finish(&[], &[])?;
    Ok(RunnableGraph::new(graph))
  }

  /// Finishes a source whose only open port is `outlet`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnexpectedBoundary`] when `outlet` is not open,
  /// [`GraphError::UnconnectedPort`] when another port stays open and
  /// [`GraphError::UnbufferedCycle`] when a cycle lacks a buffering stage.
  pub fn build_source<Out>(self, outlet: Outlet<Out>) -> Result<Source<Out, Mat>, GraphError>
  where
    Out: Send + 'static, {
    let outlet = self.resolve(outlet.id())?;
    let graph = self.finish(&[], &[outlet])?;
    Ok(Source::from_graph(graph))
  }

  /// Finishes a sink whose only open port is `inlet`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnexpectedBoundary`] when `inlet` is not open,
  /// [`GraphError::UnconnectedPort`] when another port stays open and
  /// [`GraphError::UnbufferedCycle`] when a cycle lacks a buffering stage.
  pub fn build_sink<In>(self, inlet: Inlet<In>) -> Result<Sink<In, Mat>, GraphError>
  where
    In: Send + 'static, {
    let inlet = self.resolve(inlet.id())?;
    let graph = self.finish(&[inlet], &[])?;
    Ok(Sink::from_graph(graph))
  }

  /// Finishes a flow whose only open ports are `inlet` and `outlet`.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::UnexpectedBoundary`] when either port is not open,
  /// [`GraphError::UnconnectedPort`] when another port stays open and
  /// [`GraphError::UnbufferedCycle`] when a cycle lacks a buffering stage.
  pub fn build_flow<In, Out>(self, inlet: Inlet<In>, outlet: Outlet<Out>) -> Result<Flow<In, Out, Mat>, GraphError>
  where
    In: Send + 'static,
    Out: Send + 'static, {
    let inlet = self.resolve(inlet.id())?;
    let outlet = self.resolve(outlet.id())?;
    let graph = self.finish(&[inlet], &[outlet])?;
    Ok(Flow::from_graph(graph))
  }

  fn shape_of<C>(&self, other: &StreamGraph) -> Result<C::Shape, GraphError>
  where
    C: GraphComponent, {
    let offset = self.graph.stage_count();
    let ports = |addrs: &[PortAddr]| -> Vec<PortId> {
      addrs.iter().map(|addr| PortId::new(self.token, addr.stage + offset, addr.slot)).collect()
    };
    C::make_shape(&ports(other.open_inlets()), &ports(other.open_outlets()))
  }

  fn resolve(&self, port: PortId) -> Result<PortAddr, GraphError> {
    if port.token() != self.token {
      return Err(GraphError::UnknownStage);
    }
    Ok(PortAddr::new(port.stage(), port.slot()))
  }

  fn finish(mut self, inlets: &[PortAddr], outlets: &[PortAddr]) -> Result<StreamGraph, GraphError> {
    self.graph.seal(inlets, outlets)?;
    self.graph.validate_cycles()?;
    Ok(self.graph)
  }
}
