//! Deferred card advance after scoring.
//!
//! Scoring a card earns a [`PendingAdvance`]; the scheduler hands it back on
//! a channel once the configured delay has passed. The spawned task's handle
//! doubles as the cancellation handle, and the session's epoch check drops
//! any advance that still slips through after a reset.

use std::time::Duration;

use flipcards_core::PendingAdvance;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct AdvanceScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<PendingAdvance>,
    task: Option<JoinHandle<()>>,
}

impl AdvanceScheduler {
    /// Create a scheduler and the receiver its advances arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<PendingAdvance>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            task: None,
        };
        (scheduler, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Deliver `pending` after the delay. At most one advance is in flight;
    /// scheduling replaces any earlier one.
    pub fn schedule(&mut self, pending: PendingAdvance) {
        self.cancel();

        if self.delay.is_zero() {
            let _ = self.tx.send(pending);
            return;
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::trace!(card = pending.card_index(), ?delay, "scheduling advance");
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(pending);
        }));
    }

    /// Abort the in-flight advance, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::trace!("cancelling pending advance");
            }
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for AdvanceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
