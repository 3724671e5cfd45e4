//! Port operations available to stage logic while it handles a signal.


use alloc::{boxed::Box, vec::Vec};
use core::task::Waker;

use super::{
  Demand, DynValue, StreamError,
  inlet_state::{InletState, InletStatus},
  outbound_signal::OutboundSignal,
  outlet_state::OutletState,
};

/// View of a stage's ports handed to every [`StageLogic`](super::StageLogic) callback.
///
/// Operations are recorded and delivered to peer stages once the callback returns, in the order
/// they were issued.
pub struct StageContext<'a> {
  inlets:     &'a mut [InletState],
  outlets:    &'a mut [OutletState],
  outbound:   &'a mut Vec<OutboundSignal>,
  capacity:   usize,
  waker:      &'a Waker,
  stage_name: &'a str,
}

impl<'a> StageContext<'a> {
  pub(crate) const fn new(
    inlets: &'a mut [InletState],
    outlets: &'a mut [OutletState],
    outbound: &'a mut Vec<OutboundSignal>,
    capacity: usize,
    waker: &'a Waker,
    stage_name: &'a str,
  ) -> Self {
    Self { inlets, outlets, outbound, capacity, waker, stage_name }
  }

  /// Returns the name of the running stage.
  #[must_use]
  pub const fn stage_name(&self) -> &str {
    self.stage_name
  }

  /// Returns the number of inlets.
  #[must_use]
  pub const fn inlet_count(&self) -> usize {
    self.inlets.len()
  }

  /// Returns the number of outlets.
  #[must_use]
  pub const fn outlet_count(&self) -> usize {
    self.outlets.len()
  }

  /// Returns the maximum demand this stage may have outstanding on one inlet.
  #[must_use]
  pub const fn buffer_capacity(&self) -> usize {
    self.capacity
  }

  /// Returns a waker that schedules [`StageLogic::on_wake`](super::StageLogic::on_wake).
  #[must_use]
  pub const fn waker(&self) -> &Waker {
    self.waker
  }

  /// Returns the demand granted by downstream and not yet consumed on `outlet`.
  #[must_use]
  pub fn demand(&self, outlet: usize) -> Demand {
    match self.outlets.get(outlet) {
      | Some(state) if !state.closed => state.demand.current(),
      | _ => Demand::Finite(0),
    }
  }

  /// Returns `true` when one element may be pushed on `outlet`.
  #[must_use]
  pub fn has_demand(&self, outlet: usize) -> bool {
    self.demand(outlet).has_demand()
  }

  /// Returns `true` when `outlet` is open and downstream still accepts elements.
  #[must_use]
  pub fn is_outlet_open(&self, outlet: usize) -> bool {
    self.outlets.get(outlet).is_some_and(|state| !state.closed)
  }

  /// Returns `true` when `inlet` may still deliver elements.
  #[must_use]
  pub fn is_inlet_open(&self, inlet: usize) -> bool {
    self.inlets.get(inlet).is_some_and(InletState::is_open)
  }

  /// Returns `true` when no inlet may deliver elements anymore.
  #[must_use]
  pub fn all_inlets_closed(&self) -> bool {
    self.inlets.iter().all(|state| !state.is_open())
  }

  /// Returns `true` when every outlet is closed.
  #[must_use]
  pub fn all_outlets_closed(&self) -> bool {
    self.outlets.iter().all(|state| state.closed)
  }

  /// Returns the demand requested on `inlet` and not yet answered by a push.
  #[must_use]
  pub fn outstanding(&self, inlet: usize) -> u64 {
    self.inlets.get(inlet).map_or(0, |state| state.outstanding)
  }

  /// Emits one element on `outlet`, consuming one unit of demand.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::ProtocolViolation`] when the outlet is unknown, closed or has no demand.
  pub fn push(&mut self, outlet: usize, element: DynValue) -> Result<(), StreamError> {
    let Some(state) = self.outlets.get_mut(outlet) else {
      return Err(StreamError::ProtocolViolation { reason: "push to unknown outlet" });
    };
    if state.closed {
      return Err(StreamError::ProtocolViolation { reason: "push to closed outlet" });
    }
    if !state.demand.consume_one() {
      return Err(StreamError::ProtocolViolation { reason: "push without demand" });
    }
    self.outbound.push(OutboundSignal::Push { outlet, element });
    Ok(())
  }

  /// Typed convenience for [`Self::push`].
  ///
  /// # Errors
  ///
  /// Same as [`Self::push`].
  pub fn push_value<T>(&mut self, outlet: usize, value: T) -> Result<(), StreamError>
  where
    T: Send + 'static, {
    self.push(outlet, Box::new(value))
  }

  /// Requests `n` more elements from upstream on `inlet`.
  ///
  /// Requests on a closed inlet are ignored.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidDemand`] when `n` is zero or the inlet is unknown, and
  /// [`StreamError::BackpressureViolation`] when the outstanding demand would exceed the buffer
  /// capacity.
  pub fn request(&mut self, inlet: usize, n: u64) -> Result<(), StreamError> {
    if n == 0 {
      return Err(StreamError::InvalidDemand);
    }
    let capacity = self.capacity;
    let Some(state) = self.inlets.get_mut(inlet) else {
      return Err(StreamError::InvalidDemand);
    };
    if !state.is_open() {
      return Ok(());
    }
    let requested = state.outstanding.saturating_add(n);
    if requested > capacity as u64 {
      return Err(StreamError::BackpressureViolation { requested, capacity });
    }
    state.outstanding = requested;
    self.outbound.push(OutboundSignal::Request { inlet, n });
    Ok(())
  }

  /// Raises the outstanding demand on `inlet` to `target`, capped by the buffer capacity.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidDemand`] when the inlet is unknown.
  pub fn top_up(&mut self, inlet: usize, target: u64) -> Result<(), StreamError> {
    let target = target.min(self.capacity as u64);
    let outstanding = self.outstanding(inlet);
    if target > outstanding {
      self.request(inlet, target - outstanding)?;
    } else if inlet >= self.inlets.len() {
      return Err(StreamError::InvalidDemand);
    }
    Ok(())
  }

  /// Keeps the demand on `inlet` aligned with the demand downstream granted on `outlet`.
  ///
  /// Used by stages that emit at most one element per received element.
  ///
  /// # Errors
  ///
  /// Same as [`Self::top_up`].
  pub fn forward_demand(&mut self, inlet: usize, outlet: usize) -> Result<(), StreamError> {
    let demand = self.demand(outlet).saturated();
    self.top_up(inlet, demand)
  }

  /// Completes `outlet`. Completing a closed outlet does nothing.
  pub fn complete(&mut self, outlet: usize) {
    if let Some(state) = self.outlets.get_mut(outlet)
      && !state.closed
    {
      state.closed = true;
      self.outbound.push(OutboundSignal::Complete { outlet });
    }
  }

  /// Fails `outlet` with `error`. Failing a closed outlet does nothing.
  pub fn fail(&mut self, outlet: usize, error: StreamError) {
    if let Some(state) = self.outlets.get_mut(outlet)
      && !state.closed
    {
      state.closed = true;
      self.outbound.push(OutboundSignal::Fail { outlet, error });
    }
  }

  /// Cancels `inlet`; elements still in flight on it are dropped.
  pub fn cancel(&mut self, inlet: usize) {
    if let Some(state) = self.inlets.get_mut(inlet)
      && state.is_open()
    {
      state.status = InletStatus::Cancelled;
      state.outstanding = 0;
      self.outbound.push(OutboundSignal::Cancel { inlet });
    }
  }

  /// Completes every open outlet and cancels every open inlet.
  pub fn complete_stage(&mut self) {
    for outlet in 0..self.outlets.len() {
      self.complete(outlet);
    }
    for inlet in 0..self.inlets.len() {
      self.cancel(inlet);
    }
  }
}
