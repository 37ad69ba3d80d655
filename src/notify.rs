use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, Sender, error::TrySendError};

use crate::error::NotifyError;
use crate::model::{LawStatus, World};
use crate::sim::Signal;

/// Outbound chat or webhook integration. Called off the tick path; may block.
pub trait Notifier: Send + Sync + 'static {
    fn send(&self, message: &str) -> Result<(), NotifyError>;
}

impl<F> Notifier for F
where
    F: Fn(&str) -> Result<(), NotifyError> + Send + Sync + 'static,
{
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        self(message)
    }
}

/// Messages held for a slow notifier before new ones are dropped.
pub const OUTBOX_CAPACITY: usize = 256;

/// Fire-and-forget queue in front of a [`Notifier`].
///
/// Queuing never blocks or fails the caller. A detached worker delivers
/// messages in order; delivery errors and panics are logged and dropped.
/// While the queue is full, new messages are discarded.
#[derive(Debug, Clone)]
pub struct NotificationOutbox {
    sender: Sender<String>,
}

impl NotificationOutbox {
    pub fn spawn(notifier: Arc<dyn Notifier>, handle: &Handle) -> Self {
        Self::with_capacity(notifier, handle, OUTBOX_CAPACITY)
    }

    /// Panics if `capacity` is zero.
    pub fn with_capacity(notifier: Arc<dyn Notifier>, handle: &Handle, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<String>(capacity);
        handle.spawn(async move {
            while let Some(message) = receiver.recv().await {
                let notifier = Arc::clone(&notifier);
                match tokio::task::spawn_blocking(move || notifier.send(&message)).await {
                    Ok(Ok(())) => tracing::trace!("notification delivered"),
                    Ok(Err(err)) => tracing::warn!(error = %err, "notification failed"),
                    Err(err) => tracing::warn!(error = %err, "notifier panicked"),
                }
            }
            tracing::debug!("notification outbox closed");
        });
        Self { sender }
    }

    pub fn send(&self, message: String) {
        match self.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::warn!(
                capacity = self.sender.max_capacity(),
                "notification queue full; message dropped"
            ),
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("notification worker gone; message dropped")
            }
        }
    }

    /// Messages waiting for the worker.
    pub fn queued(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}

/// Human-readable text for the signals worth announcing outside the engine.
pub fn describe(signal: &Signal, world: &World) -> Option<String> {
    let tick = world.tick();
    match signal {
        Signal::MarketShock {
            kind, magnitude, ..
        } => Some(format!(
            "[tick {tick}] Market {kind}: production x{magnitude:.2}"
        )),
        Signal::LawEnacted { law_id } => world
            .laws
            .iter()
            .find(|l| l.id == *law_id)
            .map(|l| format!("[tick {tick}] New law enacted: {}", l.title)),
        Signal::LawTransitioned {
            law_id,
            to: LawStatus::Repealed,
            ..
        } => world
            .laws
            .iter()
            .find(|l| l.id == *law_id)
            .map(|l| format!("[tick {tick}] Law repealed: {}", l.title)),
        Signal::ResearchCompleted { node_id, .. } => world
            .research
            .get(node_id)
            .map(|n| format!("[tick {tick}] Breakthrough: {}", n.name)),
        Signal::ActionBlocked { blocked_id } => world
            .ethics
            .blocked_actions
            .iter()
            .find(|b| b.id == *blocked_id)
            .map(|b| format!("[tick {tick}] Ethics veto: {}", b.action)),
        Signal::GovernanceModeChanged { from, to } => Some(format!(
            "[tick {tick}] Governance mode {from} -> {to}"
        )),
        _ => None,
    }
}
