//! Probes for driving and observing streams in tests.

// Bridge imports for children
use super::{
  CancelHandle, DynValue, GraphStage, MaterializeContext, Sink, Source, StageContext, StageLogic, StageShape,
  StageTermination, StreamError, StreamGraph, downcast_value, stage_descriptor::StageDescriptor,
};


/// Sink stage recording what it receives.
mod test_sink_probe;
/// Source stage emitting what a test sends.
mod test_source_probe;

pub use test_sink_probe::TestSinkProbe;
pub use test_source_probe::TestSourceProbe;
