use alloc::{vec, vec::Vec};

use super::stream_graph::{PortAddr, StreamGraph};

/// Peer port of every stage port, derived once from the graph's edges.
pub(crate) struct Wiring {
  inlet_peers:  Vec<Vec<Option<PortAddr>>>,
  outlet_peers: Vec<Vec<Option<PortAddr>>>,
}

impl Wiring {
  pub(crate) fn new(graph: &StreamGraph) -> Self {
    let mut inlet_peers: Vec<Vec<Option<PortAddr>>> =
      graph.stages().iter().map(|stage| vec![None; stage.shape.inlets().len()]).collect();
    let mut outlet_peers: Vec<Vec<Option<PortAddr>>> =
      graph.stages().iter().map(|stage| vec![None; stage.shape.outlets().len()]).collect();
    for edge in graph.edges() {
      if let Some(slot) = outlet_peers.get_mut(edge.from.stage).and_then(|slots| slots.get_mut(edge.from.slot)) {
        *slot = Some(edge.to);
      }
      if let Some(slot) = inlet_peers.get_mut(edge.to.stage).and_then(|slots| slots.get_mut(edge.to.slot)) {
        *slot = Some(edge.from);
      }
    }
    Self { inlet_peers, outlet_peers }
  }

  /// Upstream port feeding each inlet of `stage`.
  pub(crate) fn inlet_peers(&self, stage: usize) -> &[Option<PortAddr>] {
    self.inlet_peers.get(stage).map_or(&[], Vec::as_slice)
  }

  /// Downstream port fed by each outlet of `stage`.
  pub(crate) fn outlet_peers(&self, stage: usize) -> &[Option<PortAddr>] {
    self.outlet_peers.get(stage).map_or(&[], Vec::as_slice)
  }
}
