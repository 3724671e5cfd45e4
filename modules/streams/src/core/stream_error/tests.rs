use alloc::string::ToString;

use crate::core::{GraphError, StreamError};

#[test]
fn processing_error_keeps_message() {
  let error = StreamError::processing("element 5 rejected");
  assert_eq!(error, StreamError::Processing("element 5 rejected".to_string()));
  assert_eq!(error.to_string(), "stage processing failed: element 5 rejected");
}

#[test]
fn protocol_violation_names_the_rule() {
  let error = StreamError::ProtocolViolation { reason: "push without demand" };
  assert_eq!(error.to_string(), "protocol violation: push without demand");
}

#[test]
fn graph_errors_convert_into_stream_errors() {
  let error: StreamError = GraphError::UnbufferedCycle.into();
  assert_eq!(error, StreamError::InvalidGraph(GraphError::UnbufferedCycle));
}

#[test]
fn error_messages_are_stable() {
  assert_eq!(StreamError::NotStarted.to_string(), "materializer not started");
  assert_eq!(StreamError::InvalidDemand.to_string(), "invalid demand request");
  assert_eq!(StreamError::ExecutorUnavailable.to_string(), "executor is unavailable");
  assert_eq!(
    StreamError::BackpressureViolation { requested: 17, capacity: 16 }.to_string(),
    "back-pressure violation: requested 17 with capacity 16"
  );
}
