/// Built-in stage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
  /// Source emitting the elements of an iterator.
  SourceIterator,
  /// Source emitting a single element.
  SourceSingle,
  /// Source completing immediately.
  SourceEmpty,
  /// Source emitting one element forever.
  SourceRepeat,
  /// Source failing immediately.
  SourceFailed,
  /// Source polling an asynchronous producer.
  SourceAsync,
  /// Flow passing elements through.
  FlowIdentity,
  /// Flow mapping elements.
  FlowMap,
  /// Flow dropping elements that fail a predicate.
  FlowFilter,
  /// Flow mapping elements with a fallible function.
  FlowTryMap,
  /// Flow completing after a fixed number of elements.
  FlowTake,
  /// Flow decoupling upstream from downstream with a bounded buffer.
  FlowBuffer,
  /// Junction emitting each element to every output.
  Broadcast,
  /// Junction interleaving elements from several inputs.
  Merge,
  /// Sink discarding elements.
  SinkIgnore,
  /// Sink folding elements.
  SinkFold,
  /// Sink resolving with the first element.
  SinkHead,
  /// Sink applying a closure to each element.
  SinkForeach,
  /// Sink collecting elements.
  SinkCollect,
  /// Stage provided through [`GraphStage`](super::GraphStage).
  Custom,
}

impl StageKind {
  /// Returns the name used when no name attribute is set.
  #[must_use]
  pub const fn default_name(&self) -> &'static str {
    match self {
      | Self::SourceIterator => "iteratorSource",
      | Self::SourceSingle => "singleSource",
      | Self::SourceEmpty => "emptySource",
      | Self::SourceRepeat => "repeatSource",
      | Self::SourceFailed => "failedSource",
      | Self::SourceAsync => "asyncSource",
      | Self::FlowIdentity => "identity",
      | Self::FlowMap => "map",
      | Self::FlowFilter => "filter",
      | Self::FlowTryMap => "tryMap",
      | Self::FlowTake => "take",
      | Self::FlowBuffer => "buffer",
      | Self::Broadcast => "broadcast",
      | Self::Merge => "merge",
      | Self::SinkIgnore => "ignoreSink",
      | Self::SinkFold => "foldSink",
      | Self::SinkHead => "headSink",
      | Self::SinkForeach => "foreachSink",
      | Self::SinkCollect => "collectSink",
      | Self::Custom => "custom",
    }
  }
}
