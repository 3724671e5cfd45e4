//! Portable stream engine: blueprints, the demand protocol, built-in stages and the cooperative
//! interpreter. Needs only `alloc`.

/// Stage attributes such as names and buffer sizes.
mod attributes;
/// Fan-out junction.
mod broadcast;
/// External cancellation of a stage.
mod cancel_handle;
/// Completion polling types.
mod completion;
/// Component wrapping a custom stage.
mod custom_stage;
/// Demand model types.
mod demand;
/// Demand tracking utilities.
mod demand_tracker;
/// Drive outcome enums.
mod drive_outcome;
/// Type-erased elements.
mod dyn_value;
/// Flow blueprints.
mod flow;
/// Builder for arbitrary topologies.
mod graph_builder;
/// Components accepted by the graph builder.
mod graph_component;
/// Graph construction errors.
mod graph_error;
/// Single-threaded graph interpreter.
mod graph_interpreter;
/// Stage definitions.
mod graph_stage;
/// Per-inlet protocol state.
mod inlet_state;
/// Materialization step shared by every materializer.
pub(crate) mod instantiated_stream;
/// Keep-both materialization rule.
mod keep_both;
/// Keep-left materialization rule.
mod keep_left;
/// Keep-none materialization rule.
mod keep_none;
/// Keep-right materialization rule.
mod keep_right;
/// Custom materialization rule.
mod keep_with;
/// Mailbox polled by the interpreter.
mod local_mailbox;
/// Waker posting wake signals.
mod mailbox_waker;
/// Materialization combination kinds.
mod mat_combine;
/// Materialization combination rules.
mod mat_combine_rule;
/// Deferred materialized-value recipe.
mod mat_tree;
/// Per-run information for stage factories.
mod materialize_context;
/// Materialized result wrapper.
mod materialized;
/// Materializer trait.
mod materializer;
/// Materializer configuration.
mod materializer_config;
/// Fan-in junction.
mod merge;
/// Signals emitted by a stage.
mod outbound_signal;
/// Per-outlet protocol state.
mod outlet_state;
/// Address of a connected peer port.
mod peer_port;
/// Closed, reusable blueprints.
mod runnable_graph;
/// Scripted peers for runner tests.
#[cfg(test)]
mod runner_harness;
/// Port handles and shapes.
mod shape;
/// Signals delivered to a stage.
mod signal;
/// Sink blueprints.
mod sink;
/// Source blueprints.
mod source;
/// Built-in stages.
mod stage;
/// Stage execution context.
mod stage_context;
/// Stage definition stored in a graph.
mod stage_descriptor;
/// Per-run stage instantiation.
mod stage_factory;
/// Built-in stage kinds.
mod stage_kind;
/// Stage behaviour callbacks.
mod stage_logic;
/// Signal delivery into a stage.
pub(crate) mod stage_mailbox;
/// Protocol enforcement around stage logic.
pub(crate) mod stage_runner;
/// Declared stage ports.
mod stage_shape;
/// Stage lifecycle states.
mod stage_state;
/// How a stage stopped.
mod stage_termination;
/// Stream buffer implementation.
mod stream_buffer;
/// Stream buffer configuration.
mod stream_buffer_config;
/// Stream completion handle.
mod stream_completion;
/// Stream completion marker.
mod stream_done;
/// Stream error definitions.
mod stream_error;
/// Type-erased graph arena.
mod stream_graph;
/// Running stream handle.
mod stream_handle;
/// Stream handle identifier.
mod stream_handle_id;
/// Materializer driving streams with graph interpreters.
mod stream_materializer;
/// Stream not-used marker.
mod stream_not_used;
/// State shared by the stages of one stream.
mod stream_shared;
/// Stream state enum.
mod stream_state;
/// Probes for tests.
pub mod testing;
/// Peer lookup for every stage port.
mod wiring;

pub use attributes::Attributes;
pub use broadcast::Broadcast;
pub use cancel_handle::CancelHandle;
pub use completion::Completion;
pub use custom_stage::CustomStage;
pub use demand::Demand;
pub use demand_tracker::DemandTracker;
pub use drive_outcome::DriveOutcome;
pub use dyn_value::{DynValue, downcast_value};
pub use flow::Flow;
pub use graph_builder::GraphBuilder;
pub use graph_component::GraphComponent;
pub use graph_error::GraphError;
pub use graph_interpreter::GraphInterpreter;
pub use graph_stage::GraphStage;
pub use keep_both::KeepBoth;
pub use keep_left::KeepLeft;
pub use keep_none::KeepNone;
pub use keep_right::KeepRight;
pub use keep_with::KeepWith;
pub use mat_combine::MatCombine;
pub use mat_combine_rule::MatCombineRule;
pub use materialize_context::MaterializeContext;
pub use materialized::Materialized;
pub use materializer::Materializer;
pub use materializer_config::MaterializerConfig;
pub use merge::Merge;
pub use runnable_graph::RunnableGraph;
pub use shape::{
  FlowShape, Inlet, Outlet, PortId, PortShape, SinkShape, SourceShape, UniformFanInShape, UniformFanOutShape,
};
pub use signal::Signal;
pub use sink::Sink;
pub use source::Source;
pub use stage_context::StageContext;
pub use stage_kind::StageKind;
pub use stage_logic::StageLogic;
pub use stage_shape::{PortType, StageShape};
pub use stage_state::StageState;
pub use stage_termination::StageTermination;
pub use stream_buffer::StreamBuffer;
pub use stream_buffer_config::StreamBufferConfig;
pub use stream_completion::StreamCompletion;
pub use stream_done::StreamDone;
pub use stream_error::StreamError;
pub use stream_graph::StreamGraph;
pub use stream_handle::StreamHandle;
pub use stream_handle_id::StreamHandleId;
pub use stream_materializer::StreamMaterializer;
pub use stream_not_used::StreamNotUsed;
pub use stream_state::StreamState;
