//! Drives a single stage runner against scripted peers.

use alloc::{boxed::Box, string::String, sync::Arc, vec, vec::Vec};
use core::any::Any;

use super::{
  Signal, StageLogic, StreamHandleId, downcast_value, local_mailbox::LocalMailbox, mailbox_waker::MailboxWaker,
  peer_port::PeerPort, stage_mailbox::StageMailbox, stage_runner::StageRunner, stream_shared::StreamShared,
};

pub(crate) struct RunnerHarness {
  pub(crate) runner: StageRunner,
  pub(crate) shared: Arc<StreamShared>,
  own:               Arc<LocalMailbox>,
  upstream:          Vec<Arc<LocalMailbox>>,
  downstream:        Vec<Arc<LocalMailbox>>,
}

impl RunnerHarness {
  pub(crate) fn new(logic: Box<dyn StageLogic>, inlets: usize, outlets: usize) -> Self {
    Self::with_capacity(logic, inlets, outlets, 16)
  }

  pub(crate) fn with_capacity(logic: Box<dyn StageLogic>, inlets: usize, outlets: usize, capacity: usize) -> Self {
    let own = Arc::new(LocalMailbox::new());
    let upstream: Vec<Arc<LocalMailbox>> = (0..inlets).map(|_| Arc::new(LocalMailbox::new())).collect();
    let downstream: Vec<Arc<LocalMailbox>> = (0..outlets).map(|_| Arc::new(LocalMailbox::new())).collect();
    let peers = |mailboxes: &Vec<Arc<LocalMailbox>>| {
      mailboxes.iter().map(|mailbox| PeerPort::new(mailbox.clone() as Arc<dyn StageMailbox>, 0)).collect::<Vec<_>>()
    };
    let shared = Arc::new(StreamShared::new(StreamHandleId::new(1), 1));
    let waker = MailboxWaker::waker(own.clone());
    let runner = StageRunner::new(
      String::from("stage"),
      logic,
      peers(&upstream),
      peers(&downstream),
      capacity,
      waker,
      shared.clone(),
    );
    Self { runner, shared, own, upstream, downstream }
  }

  pub(crate) fn start(&mut self) {
    self.runner.handle(Signal::Start);
    self.run_wakes();
  }

  pub(crate) fn request(&mut self, outlet: usize, n: u64) {
    self.runner.handle(Signal::Request { outlet, n });
    self.run_wakes();
  }

  pub(crate) fn cancel(&mut self, outlet: usize) {
    self.runner.handle(Signal::Cancel { outlet });
  }

  pub(crate) fn push<T: Send + 'static>(&mut self, inlet: usize, value: T) {
    self.runner.handle(Signal::Push { inlet, element: Box::new(value) });
    self.run_wakes();
  }

  pub(crate) fn complete(&mut self, inlet: usize) {
    self.runner.handle(Signal::Complete { inlet });
    self.run_wakes();
  }

  /// Processes the signals the stage posted to itself.
  pub(crate) fn run_wakes(&mut self) {
    while let Some(signal) = self.own.pop() {
      self.runner.handle(signal);
    }
  }

  pub(crate) fn upstream_signals(&self, inlet: usize) -> Vec<Signal> {
    drain(&self.upstream[inlet])
  }

  pub(crate) fn downstream_signals(&self, outlet: usize) -> Vec<Signal> {
    drain(&self.downstream[outlet])
  }

  /// Sums the demand requested on `inlet` since the last drain.
  pub(crate) fn requested(&self, inlet: usize) -> u64 {
    self
      .upstream_signals(inlet)
      .into_iter()
      .map(|signal| match signal {
        | Signal::Request { n, .. } => n,
        | _ => 0,
      })
      .sum()
  }

  /// Returns the elements pushed on `outlet` since the last drain.
  pub(crate) fn pushed<T: Any + Send>(&self, outlet: usize) -> Vec<T> {
    let mut values = vec![];
    for signal in self.downstream_signals(outlet) {
      if let Signal::Push { element, .. } = signal {
        values.push(downcast_value::<T>(element).expect("element type"));
      }
    }
    values
  }
}

fn drain(mailbox: &LocalMailbox) -> Vec<Signal> {
  let mut signals = Vec::new();
  while let Some(signal) = mailbox.pop() {
    signals.push(signal);
  }
  signals
}
