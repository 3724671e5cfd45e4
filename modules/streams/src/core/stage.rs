//! Built-in stages behind the `Source`, `Flow` and `Sink` constructors.

use super::{
  DynValue, GraphStage, MaterializeContext, StageContext, StageKind, StageLogic, StageShape, StageTermination,
  StreamBuffer, StreamCompletion, StreamDone, StreamError, StreamNotUsed, downcast_value,
};

/// Stage polling an asynchronous producer.
mod async_source;
/// Stage decoupling upstream and downstream with a bounded buffer.
mod buffer_flow;
/// Stage failing on start.
mod failed_source;
/// Stage dropping elements rejected by a predicate.
mod filter_flow;
/// Stage folding elements into an accumulator.
mod fold_sink;
/// Stage applying a side effect per element.
mod foreach_sink;
/// Stage resolving with the first element.
mod head_sink;
/// Stage emitting the elements of an iterator.
mod iterator_source;
/// Stage mapping elements.
mod map_flow;
/// Stage completing after a number of elements.
mod take_flow;
/// Stage mapping elements with a fallible function.
mod try_map_flow;

pub(crate) use async_source::AsyncSource;
pub(crate) use buffer_flow::BufferFlow;
pub(crate) use failed_source::FailedSource;
pub(crate) use filter_flow::FilterFlow;
pub(crate) use fold_sink::FoldSink;
pub(crate) use foreach_sink::ForeachSink;
pub(crate) use head_sink::HeadSink;
pub(crate) use iterator_source::IteratorSource;
pub(crate) use map_flow::MapFlow;
pub(crate) use take_flow::TakeFlow;
pub(crate) use try_map_flow::TryMapFlow;

/// Resolves a sink completion from the stage termination.
fn resolve<T>(completion: &StreamCompletion<T>, termination: &StageTermination, value: impl FnOnce() -> T) {
  let result = match termination {
    | StageTermination::Completed => Ok(value()),
    | StageTermination::Cancelled => Err(StreamError::Cancelled),
    | StageTermination::Failed(error) => Err(error.clone()),
  };
  completion.complete(result);
}
