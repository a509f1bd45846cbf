//! Scheduler that never fires on its own.

use parking_lot::Mutex;

use crate::port::inbound::{Scheduler, Timer, Wakeup};

/// Records every scheduled wakeup. Tests hand them to `RaceEngine::fire`.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: Mutex<Vec<Wakeup>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every wakeup scheduled so far, oldest first.
    pub fn armed(&self) -> Vec<Wakeup> {
        self.armed.lock().clone()
    }

    /// The most recently scheduled wakeup.
    pub fn last(&self) -> Option<Wakeup> {
        self.armed.lock().last().copied()
    }

    /// The most recently scheduled wakeup for `timer`.
    pub fn last_of(&self, timer: Timer) -> Option<Wakeup> {
        self.armed
            .lock()
            .iter()
            .rev()
            .find(|wakeup| wakeup.timer == timer)
            .copied()
    }

    pub fn count(&self) -> usize {
        self.armed.lock().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, wakeup: Wakeup) {
        self.armed.lock().push(wakeup);
    }
}
