//! Type-erased graph arena shared by every blueprint.


use alloc::{collections::VecDeque, vec, vec::Vec};

use super::{
  Attributes, GraphError, MatCombineRule, StageKind, mat_tree::MatTree, stage_descriptor::StageDescriptor,
};

/// Address of one port: stage index in the arena and port slot within the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct PortAddr {
  pub(crate) stage: usize,
  pub(crate) slot:  usize,
}

impl PortAddr {
  pub(crate) const fn new(stage: usize, slot: usize) -> Self {
    Self { stage, slot }
  }
}

/// Directed connection from an outlet to an inlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
  pub(crate) from: PortAddr,
  pub(crate) to:   PortAddr,
}

/// Stages, edges and materialized-value recipe of a blueprint.
///
/// Ports not covered by an edge are the graph's boundary, kept in declaration order.
#[derive(Clone)]
pub struct StreamGraph {
  stages:  Vec<StageDescriptor>,
  edges:   Vec<Edge>,
  mat:     MatTree,
  inlets:  Vec<PortAddr>,
  outlets: Vec<PortAddr>,
}

impl StreamGraph {
  /// Graph without stages materializing [`StreamNotUsed`](super::StreamNotUsed).
  pub(crate) const fn empty() -> Self {
    Self { stages: Vec::new(), edges: Vec::new(), mat: MatTree::NotUsed, inlets: Vec::new(), outlets: Vec::new() }
  }

  pub(crate) fn from_stage(descriptor: StageDescriptor) -> Self {
    let inlets = (0..descriptor.shape.inlets().len()).map(|slot| PortAddr::new(0, slot)).collect();
    let outlets = (0..descriptor.shape.outlets().len()).map(|slot| PortAddr::new(0, slot)).collect();
    Self { stages: vec![descriptor], edges: Vec::new(), mat: MatTree::stage(0), inlets, outlets }
  }

  /// Returns the number of stages.
  #[must_use]
  pub fn stage_count(&self) -> usize {
    self.stages.len()
  }

  /// Returns the resolved stage names in arena order.
  #[must_use]
  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(StageDescriptor::name).collect()
  }

  pub(crate) fn stages(&self) -> &[StageDescriptor] {
    &self.stages
  }

  pub(crate) fn edges(&self) -> &[Edge] {
    &self.edges
  }

  pub(crate) const fn mat(&self) -> &MatTree {
    &self.mat
  }

  pub(crate) fn open_inlets(&self) -> &[PortAddr] {
    &self.inlets
  }

  pub(crate) fn open_outlets(&self) -> &[PortAddr] {
    &self.outlets
  }

  /// Places `other` next to `self` and combines the materialized values with `rule`.
  ///
  /// Returns the offset added to the stage indices of `other`.
  pub(crate) fn compose<L, R, C>(mut self, other: Self, rule: C) -> (Self, usize)
  where
    L: Send + 'static,
    R: Send + 'static,
    C: MatCombineRule<L, R>,
    C::Out: Send + 'static, {
    let offset = self.stages.len();
    let Self { stages, edges, mut mat, inlets, outlets } = other;
    mat.shift(offset);
    let shift = |addr: PortAddr| PortAddr::new(addr.stage + offset, addr.slot);
    self.stages.extend(stages);
    self.edges.extend(edges.into_iter().map(|edge| Edge { from: shift(edge.from), to: shift(edge.to) }));
    self.inlets.extend(inlets.into_iter().map(shift));
    self.outlets.extend(outlets.into_iter().map(shift));
    self.mat = MatTree::combine::<L, R, C>(self.mat, mat, rule);
    (self, offset)
  }

  /// Composes `self` with `other` and connects the first open outlet of `self` to the first open
  /// inlet of `other`.
  pub(crate) fn fuse<L, R, C>(self, other: Self, rule: C) -> Self
  where
    L: Send + 'static,
    R: Send + 'static,
    C: MatCombineRule<L, R>,
    C::Out: Send + 'static, {
    if other.is_pristine_identity() {
      let mut graph = self;
      graph.mat = MatTree::combine::<L, R, C>(graph.mat, MatTree::NotUsed, rule);
      return graph;
    }
    if self.is_pristine_identity() {
      let mut graph = other;
      graph.mat = MatTree::combine::<L, R, C>(MatTree::NotUsed, graph.mat, rule);
      return graph;
    }
    let left_inlets = self.inlets.len();
    let has_outlet = !self.outlets.is_empty();
    let (mut graph, _) = self.compose::<L, R, C>(other, rule);
    if has_outlet && graph.inlets.len() > left_inlets {
      let from = graph.outlets.remove(0);
      let to = graph.inlets.remove(left_inlets);
      graph.edges.push(Edge { from, to });
    }
    graph
  }

  /// Connects an open outlet to an open inlet.
  pub(crate) fn connect(&mut self, from: PortAddr, to: PortAddr) -> Result<(), GraphError> {
    let (Some(upstream), Some(downstream)) = (self.stages.get(from.stage), self.stages.get(to.stage)) else {
      return Err(GraphError::UnknownStage);
    };
    let (Some(out_type), Some(in_type)) =
      (upstream.shape.outlets().get(from.slot), downstream.shape.inlets().get(to.slot))
    else {
      return Err(GraphError::UnknownStage);
    };
    let Some(out_pos) = self.outlets.iter().position(|addr| *addr == from) else {
      return Err(GraphError::PortAlreadyConnected { stage: upstream.owned_name() });
    };
    let Some(in_pos) = self.inlets.iter().position(|addr| *addr == to) else {
      return Err(GraphError::PortAlreadyConnected { stage: downstream.owned_name() });
    };
    if out_type != in_type {
      return Err(GraphError::TypeMismatch { upstream: upstream.owned_name(), downstream: downstream.owned_name() });
    }
    self.outlets.remove(out_pos);
    self.inlets.remove(in_pos);
    self.edges.push(Edge { from, to });
    Ok(())
  }

  pub(crate) fn map_mat<A, B, F>(mut self, func: F) -> Self
  where
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static, {
    self.mat = MatTree::map(self.mat, func);
    self
  }

  /// Adds `attributes` as the outermost attributes of every stage.
  pub(crate) fn with_attributes(mut self, attributes: &Attributes) -> Self {
    for stage in &mut self.stages {
      stage.attributes = stage.attributes.clone().and(attributes.clone());
    }
    self
  }

  /// Keeps only the listed boundary ports open, in the given order.
  ///
  /// Fails with [`GraphError::UnexpectedBoundary`] when a listed port is not open and with
  /// [`GraphError::UnconnectedPort`] when another port stays open.
  pub(crate) fn seal(&mut self, inlets: &[PortAddr], outlets: &[PortAddr]) -> Result<(), GraphError> {
    let listed_open = inlets.iter().all(|addr| self.inlets.contains(addr))
      && outlets.iter().all(|addr| self.outlets.contains(addr));
    if !listed_open {
      return Err(GraphError::UnexpectedBoundary);
    }
    let stray = self
      .inlets
      .iter()
      .find(|addr| !inlets.contains(addr))
      .or_else(|| self.outlets.iter().find(|addr| !outlets.contains(addr)));
    if let Some(addr) = stray {
      let stage = self.stages.get(addr.stage).map(StageDescriptor::owned_name).unwrap_or_default();
      return Err(GraphError::UnconnectedPort { stage, slot: addr.slot });
    }
    self.inlets = inlets.to_vec();
    self.outlets = outlets.to_vec();
    Ok(())
  }

  /// Rejects cycles that do not pass through a buffering stage.
  pub(crate) fn validate_cycles(&self) -> Result<(), GraphError> {
    let count = self.stages.len();
    let mut in_degree = vec![0_usize; count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); count];
    let relevant = |edge: &Edge| !self.stages[edge.from.stage].buffering && !self.stages[edge.to.stage].buffering;
    for edge in self.edges.iter().filter(|edge| relevant(edge)) {
      successors[edge.from.stage].push(edge.to.stage);
      in_degree[edge.to.stage] += 1;
    }
    let mut ready: VecDeque<usize> = (0..count).filter(|stage| in_degree[*stage] == 0).collect();
    let mut visited = 0;
    while let Some(stage) = ready.pop_front() {
      visited += 1;
      for next in &successors[stage] {
        in_degree[*next] -= 1;
        if in_degree[*next] == 0 {
          ready.push_back(*next);
        }
      }
    }
    if visited == count { Ok(()) } else { Err(GraphError::UnbufferedCycle) }
  }

  fn is_pristine_identity(&self) -> bool {
    matches!(self.stages.as_slice(), [stage] if stage.kind == StageKind::FlowIdentity && stage.attributes.is_empty())
  }
}
