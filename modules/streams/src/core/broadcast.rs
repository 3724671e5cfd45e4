//! Fan-out junction emitting every element to all outputs.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, vec::Vec};
use core::marker::PhantomData;

use super::{
  DynValue, GraphComponent, GraphError, GraphStage, Inlet, MaterializeContext, Outlet, PortId, StageContext,
  StageKind, StageLogic, StageShape, StreamError, StreamGraph, StreamNotUsed, UniformFanOutShape, downcast_value,
  graph_error::validate_positive_argument, stage_descriptor::StageDescriptor,
};

/// Emits each upstream element to every output.
///
/// Upstream is pulled only when every output that is still open has demand, so the slowest
/// output paces the junction. Upstream is cancelled once every output cancelled.
pub struct Broadcast<T> {
  outputs: usize,
  _pd:     PhantomData<fn(T)>,
}

impl<T> Broadcast<T>
where
  T: Clone + Send + 'static,
{
  /// Creates a broadcast with `outputs` output ports.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::InvalidArgument`] when `outputs` is zero.
  pub fn new(outputs: usize) -> Result<Self, GraphError> {
    let outputs = validate_positive_argument("outputs", outputs)?;
    Ok(Self { outputs, _pd: PhantomData })
  }

  /// Returns the number of output ports.
  #[must_use]
  pub const fn outputs(&self) -> usize {
    self.outputs
  }
}

impl<T> GraphStage for Broadcast<T>
where
  T: Clone + Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    (0..self.outputs).fold(StageShape::new().with_inlet::<T>(), |shape, _| shape.with_outlet::<T>())
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let logic: BroadcastLogic<T> = BroadcastLogic { _pd: PhantomData };
    Ok((Box::new(logic), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::Broadcast
  }
}

impl<T> GraphComponent for Broadcast<T>
where
  T: Clone + Send + 'static,
{
  type Mat = StreamNotUsed;
  type Shape = UniformFanOutShape<T, T>;

  fn into_stream_graph(self) -> StreamGraph {
    StreamGraph::from_stage(StageDescriptor::new(self))
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    match inlets {
      | [inlet] if !outlets.is_empty() => {
        let outlets: Vec<Outlet<T>> = outlets.iter().copied().map(Outlet::from_id).collect();
        Ok(UniformFanOutShape::new(Inlet::from_id(*inlet), outlets))
      },
      | _ => Err(GraphError::ShapeMismatch { expected_inlets: 1, expected_outlets: outlets.len().max(1) }),
    }
  }
}

struct BroadcastLogic<T> {
  _pd: PhantomData<fn(T)>,
}

impl<T> BroadcastLogic<T> {
  fn pull(ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if !ctx.is_inlet_open(0) || ctx.outstanding(0) > 0 {
      return Ok(());
    }
    let mut open = (0..ctx.outlet_count()).filter(|outlet| ctx.is_outlet_open(*outlet)).peekable();
    if open.peek().is_none() {
      return Ok(());
    }
    if open.all(|outlet| ctx.has_demand(outlet)) {
      ctx.request(0, 1)?;
    }
    Ok(())
  }
}

impl<T> StageLogic for BroadcastLogic<T>
where
  T: Clone + Send + 'static,
{
  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    Self::pull(ctx)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, _inlet: usize, element: DynValue) -> Result<(), StreamError> {
    let value = downcast_value::<T>(element)?;
    for outlet in 0..ctx.outlet_count() {
      if ctx.is_outlet_open(outlet) {
        ctx.push_value(outlet, value.clone())?;
      }
    }
    Self::pull(ctx)
  }

  fn on_downstream_finish(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    if ctx.all_outlets_closed() {
      ctx.complete_stage();
      return Ok(());
    }
    Self::pull(ctx)
  }
}
