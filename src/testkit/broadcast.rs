//! Broadcaster that remembers what it was told.

use parking_lot::Mutex;

use crate::domain::Phase;
use crate::port::outbound::{Broadcaster, RaceEvent, RaceResult};

/// Keeps every announced event in order.
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<RaceEvent>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RaceEvent> {
        self.events.lock().clone()
    }

    /// Phases announced so far, in order.
    pub fn phases(&self) -> Vec<Phase> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RaceEvent::PhaseChanged(change) => Some(change.phase),
                _ => None,
            })
            .collect()
    }

    /// Race results announced so far.
    pub fn results(&self) -> Vec<RaceResult> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RaceEvent::RaceResult(result) => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn announce(&self, event: RaceEvent) {
        self.events.lock().push(event);
    }
}
