//! Port handles and the shapes exposed by graph components.

/// Shape of a flow.
mod flow_shape;
/// Typed inlet handles.
mod inlet;
/// Typed outlet handles.
mod outlet;
/// Port identifiers.
mod port_id;
/// Untyped shape of a custom stage.
mod port_shape;
/// Shape of a sink.
mod sink_shape;
/// Shape of a source.
mod source_shape;
/// Shape of a fan-in junction.
mod uniform_fan_in_shape;
/// Shape of a fan-out junction.
mod uniform_fan_out_shape;

pub use flow_shape::FlowShape;
pub use inlet::Inlet;
pub use outlet::Outlet;
pub use port_id::PortId;
pub use port_shape::PortShape;
pub use sink_shape::SinkShape;
pub use source_shape::SourceShape;
pub use uniform_fan_in_shape::UniformFanInShape;
pub use uniform_fan_out_shape::UniformFanOutShape;
