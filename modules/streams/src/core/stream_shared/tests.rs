use super::StreamShared;
use crate::core::{Completion, StageTermination, StreamDone, StreamError, StreamHandleId, StreamState};

#[test]
fn completes_after_last_stage() {
  let shared = StreamShared::new(StreamHandleId::new(1), 2);
  assert_eq!(shared.state(), StreamState::Idle);
  shared.mark_started();
  shared.stage_stopped(&StageTermination::Completed);
  assert_eq!(shared.state(), StreamState::Running);
  assert_eq!(shared.termination().poll(), Completion::Pending);
  shared.stage_stopped(&StageTermination::Cancelled);
  assert_eq!(shared.state(), StreamState::Completed);
  assert_eq!(shared.termination().poll(), Completion::Ready(Ok(StreamDone::new())));
}

#[test]
fn first_failure_is_reported() {
  let shared = StreamShared::new(StreamHandleId::new(2), 2);
  shared.mark_started();
  shared.stage_stopped(&StageTermination::Failed(StreamError::processing("boom")));
  shared.stage_stopped(&StageTermination::Failed(StreamError::Cancelled));
  assert_eq!(shared.state(), StreamState::Failed);
  assert_eq!(shared.termination().poll(), Completion::Ready(Err(StreamError::processing("boom"))));
}

#[test]
fn cancellation_wins_over_completion() {
  let shared = StreamShared::new(StreamHandleId::new(3), 1);
  shared.mark_started();
  shared.request_cancel();
  shared.stage_stopped(&StageTermination::Cancelled);
  assert_eq!(shared.state(), StreamState::Cancelled);
  assert_eq!(shared.termination().poll(), Completion::Ready(Err(StreamError::Cancelled)));
}
