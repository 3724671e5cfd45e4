//! Fan-in junction interleaving elements from several inputs.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, vec::Vec};
use core::marker::PhantomData;

use super::{
  DynValue, GraphComponent, GraphError, GraphStage, Inlet, MaterializeContext, Outlet, PortId, StageContext,
  StageKind, StageLogic, StageShape, StreamError, StreamGraph, StreamNotUsed, UniformFanInShape,
  graph_error::validate_positive_argument, stage_descriptor::StageDescriptor,
};

/// Emits elements from all inputs as they arrive.
///
/// Each input holds at most one pending element. Inputs are served in strict rotation starting
/// after the input served last, so while every input keeps producing the counts emitted from any
/// two inputs differ by at most one. Completes once every input completed and every pending
/// element was emitted.
pub struct Merge<T> {
  inputs: usize,
  _pd:    PhantomData<fn(T)>,
}

impl<T> Merge<T>
where
  T: Send + 'static,
{
  /// Creates a merge with `inputs` input ports.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::InvalidArgument`] when `inputs` is zero.
  pub fn new(inputs: usize) -> Result<Self, GraphError> {
    let inputs = validate_positive_argument("inputs", inputs)?;
    Ok(Self { inputs, _pd: PhantomData })
  }

  /// Returns the number of input ports.
  #[must_use]
  pub const fn inputs(&self) -> usize {
    self.inputs
  }
}

impl<T> GraphStage for Merge<T>
where
  T: Send + 'static,
{
  type Mat = StreamNotUsed;

  fn shape(&self) -> StageShape {
    (0..self.inputs).fold(StageShape::new(), |shape, _| shape.with_inlet::<T>()).with_outlet::<T>()
  }

  fn create_logic(&self, _ctx: &MaterializeContext) -> Result<(Box<dyn StageLogic>, Self::Mat), StreamError> {
    let pending = (0..self.inputs).map(|_| None).collect();
    Ok((Box::new(MergeLogic { pending, last_served: self.inputs - 1 }), StreamNotUsed::new()))
  }

  fn kind(&self) -> StageKind {
    StageKind::Merge
  }
}

impl<T> GraphComponent for Merge<T>
where
  T: Send + 'static,
{
  type Mat = StreamNotUsed;
  type Shape = UniformFanInShape<T, T>;

  fn into_stream_graph(self) -> StreamGraph {
    StreamGraph::from_stage(StageDescriptor::new(self))
  }

  fn make_shape(inlets: &[PortId], outlets: &[PortId]) -> Result<Self::Shape, GraphError> {
    match outlets {
      | [outlet] if !inlets.is_empty() => {
        let inlets: Vec<Inlet<T>> = inlets.iter().copied().map(Inlet::from_id).collect();
        Ok(UniformFanInShape::new(inlets, Outlet::from_id(*outlet)))
      },
      | _ => Err(GraphError::ShapeMismatch { expected_inlets: inlets.len().max(1), expected_outlets: 1 }),
    }
  }
}

struct MergeLogic {
  pending:     Vec<Option<DynValue>>,
  last_served: usize,
}

impl MergeLogic {
  /// Returns the input whose turn it is: the first after `last_served` that still has an element
  /// pending or may deliver one.
  fn next_turn(&self, ctx: &StageContext<'_>) -> Option<usize> {
    let inputs = self.pending.len();
    (1..=inputs)
      .map(|step| (self.last_served + step) % inputs)
      .find(|input| self.pending[*input].is_some() || ctx.is_inlet_open(*input))
  }

  fn emit(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    // An open input whose element has not arrived yet holds back the others.
    while ctx.has_demand(0) {
      let Some(input) = self.next_turn(ctx) else {
        break;
      };
      let Some(element) = self.pending[input].take() else {
        break;
      };
      ctx.push(0, element)?;
      self.last_served = input;
    }
    if ctx.has_demand(0) {
      for input in 0..self.pending.len() {
        if self.pending[input].is_none() && ctx.is_inlet_open(input) && ctx.outstanding(input) == 0 {
          ctx.request(input, 1)?;
        }
      }
    }
    if ctx.all_inlets_closed() && self.pending.iter().all(Option::is_none) {
      ctx.complete(0);
    }
    Ok(())
  }
}

impl StageLogic for MergeLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_pull(&mut self, ctx: &mut StageContext<'_>, _outlet: usize) -> Result<(), StreamError> {
    self.emit(ctx)
  }

  fn on_push(&mut self, ctx: &mut StageContext<'_>, inlet: usize, element: DynValue) -> Result<(), StreamError> {
    match self.pending.get_mut(inlet) {
      | Some(slot) if slot.is_none() => *slot = Some(element),
      | _ => return Err(StreamError::BufferOverflow),
    }
    self.emit(ctx)
  }

  fn on_upstream_finish(&mut self, ctx: &mut StageContext<'_>, _inlet: usize) -> Result<(), StreamError> {
    self.emit(ctx)
  }
}
