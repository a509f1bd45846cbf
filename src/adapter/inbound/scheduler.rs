//! Scheduler backed by tokio timers.

use tokio::sync::mpsc;
use tracing::trace;

use crate::port::inbound::{Scheduler, Wakeup};

/// Sleeps on the tokio runtime and delivers wakeups through a channel.
///
/// The receiving half is handed to `RaceEngine::run`. Superseded wakeups are
/// still delivered; the engine discards them by epoch.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<Wakeup>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Wakeup>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, wakeup: Wakeup) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(wakeup.delay).await;
            if sender.send(wakeup).is_err() {
                trace!(timer = %wakeup.timer, "Engine driver gone, dropping wakeup");
            }
        });
    }
}
