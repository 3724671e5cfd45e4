//! Materialization step shared by every materializer.

use alloc::{sync::Arc, vec::Vec};

use super::{
  CancelHandle, GraphError, MaterializeContext, MaterializerConfig, RunnableGraph, Signal, StreamError, StreamHandle,
  StreamHandleId,
  mailbox_waker::MailboxWaker,
  mat_tree::{DynMat, downcast_mat},
  peer_port::PeerPort,
  stage_mailbox::StageMailbox,
  stage_runner::StageRunner,
  stream_graph::PortAddr,
  stream_shared::StreamShared,
};

/// Runners, handle and materialized value of one freshly instantiated stream.
///
/// Every runner has `Signal::Start` queued in its mailbox; nothing ran yet.
pub(crate) struct InstantiatedStream<Mat> {
  pub(crate) runners:      Vec<StageRunner>,
  pub(crate) handle:       StreamHandle,
  pub(crate) materialized: Mat,
}

/// Instantiates every stage of `graph` with one mailbox per stage, in arena order.
pub(crate) fn instantiate<Mat>(
  graph: &RunnableGraph<Mat>,
  config: &MaterializerConfig,
  id: StreamHandleId,
  mailboxes: &[Arc<dyn StageMailbox>],
) -> Result<InstantiatedStream<Mat>, StreamError>
where
  Mat: Send + 'static, {
  let stages = graph.graph().stages();
  let wiring = graph.wiring();
  let peers = |ports: &[Option<PortAddr>], stage: usize| -> Result<Vec<PeerPort>, StreamError> {
    ports
      .iter()
      .enumerate()
      .map(|(slot, peer)| match peer.and_then(|addr| mailboxes.get(addr.stage).map(|mailbox| (mailbox, addr.slot))) {
        | Some((mailbox, peer_slot)) => Ok(PeerPort::new(mailbox.clone(), peer_slot)),
        | None => Err(StreamError::InvalidGraph(GraphError::UnconnectedPort {
          stage: stages.get(stage).map(|descriptor| descriptor.owned_name()).unwrap_or_default(),
          slot,
        })),
      })
      .collect()
  };

  let mut links = Vec::with_capacity(stages.len());
  for (index, _) in stages.iter().enumerate() {
    links.push((peers(wiring.inlet_peers(index), index)?, peers(wiring.outlet_peers(index), index)?));
  }

  let mut logics = Vec::with_capacity(stages.len());
  let mut leaves: Vec<Option<DynMat>> = Vec::with_capacity(stages.len());
  for (index, descriptor) in stages.iter().enumerate() {
    let Some(mailbox) = mailboxes.get(index) else {
      return Err(StreamError::InvalidGraph(GraphError::UnknownStage));
    };
    let capacity = descriptor.attributes.input_buffer_capacity().unwrap_or(config.buffer_config().capacity());
    let waker = MailboxWaker::waker(mailbox.clone());
    let ctx = MaterializeContext::new(
      descriptor.owned_name(),
      capacity,
      config.drive_budget(),
      CancelHandle::new(mailbox.clone()),
      waker.clone(),
    );
    let (logic, mat) = descriptor.factory.instantiate(&ctx)?;
    logics.push((logic, capacity, waker));
    leaves.push(Some(mat));
  }
  let materialized = downcast_mat::<Mat>(graph.graph().mat().evaluate(&mut leaves)?)?;

  let shared = Arc::new(StreamShared::new(id, stages.len()));
  let mut runners = Vec::with_capacity(stages.len());
  let mut terminals = Vec::new();
  for (index, ((logic, capacity, waker), (inlet_peers, outlet_peers))) in logics.into_iter().zip(links).enumerate() {
    let descriptor = &stages[index];
    if outlet_peers.is_empty() {
      terminals.push(CancelHandle::new(mailboxes[index].clone()));
    }
    runners.push(StageRunner::new(
      descriptor.owned_name(),
      logic,
      inlet_peers,
      outlet_peers,
      capacity,
      waker,
      shared.clone(),
    ));
  }
  for mailbox in mailboxes.iter().take(stages.len()) {
    mailbox.post(Signal::Start);
  }
  tracing::debug!(stream = %id, stages = stages.len(), "stream materialized");
  Ok(InstantiatedStream { runners, handle: StreamHandle::new(shared, terminals), materialized })
}
