use crate::core::{Demand, DemandTracker, StreamError};

#[test]
fn new_tracker_has_no_demand() {
  let tracker = DemandTracker::new();
  assert_eq!(tracker.current(), Demand::Finite(0));
  assert!(!tracker.has_demand());
}

#[test]
fn requests_accumulate_until_consumed() {
  let mut tracker = DemandTracker::new();
  tracker.request(3).expect("request");
  tracker.request(2).expect("request");
  let mut pushes = 0;
  while tracker.consume_one() {
    pushes += 1;
  }
  assert_eq!(pushes, 5);
  assert!(!tracker.has_demand());
}

#[test]
fn zero_request_is_rejected() {
  let mut tracker = DemandTracker::new();
  assert_eq!(tracker.request(0), Err(StreamError::InvalidDemand));
  assert_eq!(tracker.current(), Demand::Finite(0));
}

#[test]
fn overflowing_request_becomes_unbounded() {
  let mut tracker = DemandTracker::new();
  tracker.request(u64::MAX).expect("request");
  assert_eq!(tracker.request(1), Ok(Demand::Unbounded));
  assert!(tracker.consume_one());
  assert_eq!(tracker.current(), Demand::Unbounded);
}
