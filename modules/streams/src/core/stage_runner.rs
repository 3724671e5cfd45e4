//! Executes the demand/signal protocol for one stage.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, string::String, sync::Arc, vec::Vec};
use core::task::Waker;

use super::{
  Signal, StageContext, StageLogic, StageState, StageTermination, StreamError,
  inlet_state::{InletState, InletStatus},
  outbound_signal::OutboundSignal,
  outlet_state::OutletState,
  peer_port::PeerPort,
  stream_shared::StreamShared,
};

/// Owns one stage's logic and port bookkeeping and routes its signals to peer mailboxes.
///
/// Every inbound signal is validated against the protocol before the logic sees it; a violation
/// fails the stage.
pub(crate) struct StageRunner {
  name:                 String,
  logic:                Box<dyn StageLogic>,
  inlets:               Vec<InletState>,
  outlets:              Vec<OutletState>,
  inlet_peers:          Vec<PeerPort>,
  outlet_peers:         Vec<PeerPort>,
  capacity:             usize,
  waker:                Waker,
  shared:               Arc<StreamShared>,
  state:                StageState,
  downstream_cancelled: bool,
  outbound:             Vec<OutboundSignal>,
}

impl StageRunner {
  pub(crate) fn new(
    name: String,
    logic: Box<dyn StageLogic>,
    inlet_peers: Vec<PeerPort>,
    outlet_peers: Vec<PeerPort>,
    capacity: usize,
    waker: Waker,
    shared: Arc<StreamShared>,
  ) -> Self {
    Self {
      name,
      logic,
      inlets: inlet_peers.iter().map(|_| InletState::new()).collect(),
      outlets: outlet_peers.iter().map(|_| OutletState::new()).collect(),
      inlet_peers,
      outlet_peers,
      capacity,
      waker,
      shared,
      state: StageState::Idle,
      downstream_cancelled: false,
      outbound: Vec::new(),
    }
  }

  pub(crate) fn name(&self) -> &str {
    &self.name
  }

  #[cfg(test)]
  pub(crate) const fn state(&self) -> StageState {
    self.state
  }

  pub(crate) const fn is_terminated(&self) -> bool {
    self.state.is_terminal()
  }

  /// Processes one inbound signal.
  pub(crate) fn handle(&mut self, signal: Signal) {
    if self.state.is_terminal() {
      tracing::trace!(stage = %self.name, ?signal, "signal to terminated stage dropped");
      return;
    }
    if self.state == StageState::Idle {
      self.state = StageState::Running;
      self.shared.mark_started();
      let result = self.invoke(|logic, ctx| logic.on_start(ctx));
      self.settle(result);
      if self.state.is_terminal() {
        return;
      }
    }
    if matches!(signal, Signal::Start) {
      return;
    }
    let result = self.dispatch(signal);
    self.settle(result);
  }

  /// Fails the stage from outside its logic, e.g. after the logic panicked.
  pub(crate) fn abort(&mut self, error: StreamError) {
    if !self.state.is_terminal() {
      self.fail(error);
    }
  }

  fn dispatch(&mut self, signal: Signal) -> Result<(), StreamError> {
    match signal {
      | Signal::Start => Ok(()),
      | Signal::Request { outlet, n } => {
        let Some(state) = self.outlets.get_mut(outlet) else {
          return Err(StreamError::ProtocolViolation { reason: "demand on unknown outlet" });
        };
        if state.closed {
          return Ok(());
        }
        state.demand.request(n)?;
        self.invoke(|logic, ctx| logic.on_pull(ctx, outlet))
      },
      | Signal::Cancel { outlet } => {
        let Some(state) = self.outlets.get_mut(outlet) else {
          return Err(StreamError::ProtocolViolation { reason: "cancel on unknown outlet" });
        };
        if state.closed {
          return Ok(());
        }
        state.closed = true;
        self.downstream_cancelled = true;
        self.invoke(|logic, ctx| logic.on_downstream_finish(ctx, outlet))
      },
      | Signal::Push { inlet, element } => {
        let state = self.open_inlet(inlet, "push after upstream termination")?;
        let Some(state) = state else {
          tracing::trace!(stage = %self.name, inlet, "element on cancelled inlet dropped");
          return Ok(());
        };
        if state.outstanding == 0 {
          return Err(StreamError::ProtocolViolation { reason: "push without demand" });
        }
        state.outstanding -= 1;
        self.invoke(|logic, ctx| logic.on_push(ctx, inlet, element))
      },
      | Signal::Complete { inlet } => {
        let Some(state) = self.open_inlet(inlet, "duplicate upstream termination")? else {
          return Ok(());
        };
        state.status = InletStatus::Completed;
        state.outstanding = 0;
        self.invoke(|logic, ctx| logic.on_upstream_finish(ctx, inlet))
      },
      | Signal::Fail { inlet, error } => {
        let Some(state) = self.open_inlet(inlet, "duplicate upstream termination")? else {
          return Ok(());
        };
        state.status = InletStatus::Failed;
        state.outstanding = 0;
        self.invoke(|logic, ctx| logic.on_upstream_failure(ctx, inlet, error))
      },
      | Signal::Wake => self.invoke(|logic, ctx| logic.on_wake(ctx)),
      | Signal::Shutdown => self.invoke(|logic, ctx| logic.on_shutdown(ctx)),
    }
  }

  /// Returns the inlet if it is open, `None` if this stage cancelled it.
  fn open_inlet(&mut self, inlet: usize, closed_reason: &'static str) -> Result<Option<&mut InletState>, StreamError> {
    let Some(state) = self.inlets.get_mut(inlet) else {
      return Err(StreamError::ProtocolViolation { reason: "signal on unknown inlet" });
    };
    match state.status {
      | InletStatus::Open => Ok(Some(state)),
      | InletStatus::Cancelled => Ok(None),
      | InletStatus::Completed | InletStatus::Failed => Err(StreamError::ProtocolViolation { reason: closed_reason }),
    }
  }

  fn invoke<F>(&mut self, callback: F) -> Result<(), StreamError>
  where
    F: FnOnce(&mut dyn StageLogic, &mut StageContext<'_>) -> Result<(), StreamError>, {
    let mut ctx = StageContext::new(
      &mut self.inlets,
      &mut self.outlets,
      &mut self.outbound,
      self.capacity,
      &self.waker,
      &self.name,
    );
    callback(self.logic.as_mut(), &mut ctx)
  }

  fn settle(&mut self, result: Result<(), StreamError>) {
    self.flush();
    match result {
      | Ok(()) => self.update_state(),
      | Err(error) => self.fail(error),
    }
  }

  fn update_state(&mut self) {
    let inlets_closed = self.inlets.iter().all(|state| !state.is_open());
    let outlets_closed = self.outlets.iter().all(|state| state.closed);
    if inlets_closed && outlets_closed {
      let cancelled =
        self.downstream_cancelled || self.inlets.iter().any(|state| state.status == InletStatus::Cancelled);
      self.terminate(if cancelled { StageTermination::Cancelled } else { StageTermination::Completed });
    } else if inlets_closed && !self.inlets.is_empty() {
      self.state = StageState::Completing;
    }
  }

  fn fail(&mut self, error: StreamError) {
    tracing::warn!(stage = %self.name, %error, "stage failed");
    for (outlet, state) in self.outlets.iter_mut().enumerate() {
      if !state.closed {
        state.closed = true;
        self.outbound.push(OutboundSignal::Fail { outlet, error: error.clone() });
      }
    }
    for (inlet, state) in self.inlets.iter_mut().enumerate() {
      if state.is_open() {
        state.status = InletStatus::Cancelled;
        self.outbound.push(OutboundSignal::Cancel { inlet });
      }
    }
    self.flush();
    self.terminate(StageTermination::Failed(error));
  }

  fn terminate(&mut self, termination: StageTermination) {
    self.state = match termination {
      | StageTermination::Failed(_) => StageState::Failed,
      | _ => StageState::Completed,
    };
    tracing::debug!(stage = %self.name, ?termination, "stage stopped");
    self.logic.post_stop(&termination);
    self.shared.stage_stopped(&termination);
  }

  fn flush(&mut self) {
    let mut outbound = core::mem::take(&mut self.outbound);
    for signal in outbound.drain(..) {
      let delivered = match signal {
        | OutboundSignal::Request { inlet, n } => {
          deliver(&self.inlet_peers, inlet, |outlet| Signal::Request { outlet, n })
        },
        | OutboundSignal::Cancel { inlet } => deliver(&self.inlet_peers, inlet, |outlet| Signal::Cancel { outlet }),
        | OutboundSignal::Push { outlet, element } => {
          deliver(&self.outlet_peers, outlet, move |inlet| Signal::Push { inlet, element })
        },
        | OutboundSignal::Complete { outlet } => {
          deliver(&self.outlet_peers, outlet, |inlet| Signal::Complete { inlet })
        },
        | OutboundSignal::Fail { outlet, error } => {
          deliver(&self.outlet_peers, outlet, move |inlet| Signal::Fail { inlet, error })
        },
      };
      if !delivered {
        tracing::trace!(stage = %self.name, "peer stopped; signal dropped");
      }
    }
    self.outbound = outbound;
  }
}

fn deliver<F>(peers: &[PeerPort], index: usize, make: F) -> bool
where
  F: FnOnce(usize) -> Signal, {
  match peers.get(index) {
    | Some(peer) => peer.mailbox.post(make(peer.slot)),
    | None => false,
  }
}

impl Drop for StageRunner {
  fn drop(&mut self) {
    if !self.state.is_terminal() {
      let termination = StageTermination::Failed(StreamError::AbruptTermination);
      self.state = StageState::Failed;
      self.logic.post_stop(&termination);
      self.shared.stage_stopped(&termination);
    }
  }
}
