//! Closed, reusable stream blueprint.


use alloc::{string::String, sync::Arc, vec::Vec};
use core::marker::PhantomData;

use super::{Attributes, MatCombine, Materialized, Materializer, StreamError, StreamGraph, wiring::Wiring};

/// Graph without open ports, ready to be materialized any number of times.
///
/// Every run instantiates fresh stage logic, so runs never share element state or materialized
/// values.
pub struct RunnableGraph<Mat> {
  graph:  Arc<StreamGraph>,
  wiring: Arc<Wiring>,
  _pd:    PhantomData<fn() -> Mat>,
}

impl<Mat> Clone for RunnableGraph<Mat> {
  fn clone(&self) -> Self {
    Self { graph: self.graph.clone(), wiring: self.wiring.clone(), _pd: PhantomData }
  }
}

impl<Mat> RunnableGraph<Mat>
where
  Mat: Send + 'static,
{
  pub(crate) fn new(graph: StreamGraph) -> Self {
    let wiring = Wiring::new(&graph);
    Self { graph: Arc::new(graph), wiring: Arc::new(wiring), _pd: PhantomData }
  }

  /// Returns the number of stages.
  #[must_use]
  pub fn stage_count(&self) -> usize {
    self.graph.stage_count()
  }

  /// Returns the resolved stage names in graph order.
  #[must_use]
  pub fn stage_names(&self) -> Vec<String> {
    self.graph.stage_names().into_iter().map(String::from).collect()
  }

  /// Returns the rule that produced the materialized value.
  ///
  /// `None` when the value is a single stage's value or was remapped with
  /// [`Self::map_materialized_value`].
  #[must_use]
  pub fn mat_combine(&self) -> Option<MatCombine> {
    self.graph.mat().root_kind()
  }

  /// Transforms the materialized value of every future run.
  #[must_use]
  pub fn map_materialized_value<Mat2, F>(self, func: F) -> RunnableGraph<Mat2>
  where
    Mat2: Send + 'static,
    F: Fn(Mat) -> Mat2 + Send + Sync + 'static, {
    RunnableGraph::new(self.into_graph().map_mat(func))
  }

  /// Adds attributes to every stage of the graph; attributes set closer to a stage win.
  #[must_use]
  pub fn with_attributes(self, attributes: Attributes) -> Self {
    Self::new(self.into_graph().with_attributes(&attributes))
  }

  /// Names every stage of the graph that has no name yet.
  #[must_use]
  pub fn named(self, name: &str) -> Self {
    self.with_attributes(Attributes::named(name))
  }

  /// Materializes the graph with `materializer`.
  ///
  /// # Errors
  ///
  /// Returns the materializer's error when it is not running or the graph cannot be instantiated.
  pub fn run<M>(&self, materializer: &mut M) -> Result<Materialized<Mat>, StreamError>
  where
    M: Materializer, {
    materializer.materialize(self)
  }

  pub(crate) fn graph(&self) -> &StreamGraph {
    &self.graph
  }

  pub(crate) fn wiring(&self) -> &Wiring {
    &self.wiring
  }

  fn into_graph(self) -> StreamGraph {
    Arc::unwrap_or_clone(self.graph)
  }
}
