//! An engine wired to test doubles.

use std::sync::Arc;

use crate::application::engine::{RaceEngine, RaceEngineBuilder};
use crate::domain::{Participant, Phase, Track};
use crate::port::inbound::Wakeup;
use crate::port::outbound::Ledger;

use super::broadcast::RecordingBroadcaster;
use super::scheduler::ManualScheduler;

/// Two horses on a track where every stride finishes the race, so the first
/// horse in race order always wins on the first tick.
pub fn photo_finish() -> (Vec<Participant>, Track) {
    (
        vec![Participant::new("1", "Pernambuco"), Participant::new("2", "Marquinhos")],
        Track::new(10, 10, 10),
    )
}

/// Engine plus the doubles it talks to.
pub struct TestRace {
    pub engine: Arc<RaceEngine>,
    pub scheduler: Arc<ManualScheduler>,
    pub events: Arc<RecordingBroadcaster>,
}

impl TestRace {
    /// Default catalog and track, fixed seed.
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self::with(ledger, |builder| builder)
    }

    /// Two-horse photo-finish race; horse "1" wins every time.
    pub fn photo_finish(ledger: Arc<dyn Ledger>) -> Self {
        let (catalog, track) = photo_finish();
        Self::with(ledger, |builder| builder.catalog(catalog).track(track))
    }

    pub fn with(
        ledger: Arc<dyn Ledger>,
        configure: impl FnOnce(RaceEngineBuilder) -> RaceEngineBuilder,
    ) -> Self {
        let scheduler = Arc::new(ManualScheduler::new());
        let events = Arc::new(RecordingBroadcaster::new());
        let builder = RaceEngine::builder(ledger, scheduler.clone())
            .broadcaster(events.clone())
            .seed(Some(7));
        Self {
            engine: Arc::new(configure(builder).build()),
            scheduler,
            events,
        }
    }

    pub async fn phase(&self) -> Phase {
        self.engine.status().await.phase
    }

    /// Fire the most recently armed wakeup.
    pub async fn fire_last(&self) -> Option<Wakeup> {
        let wakeup = self.scheduler.last()?;
        self.engine.fire(wakeup).await;
        Some(wakeup)
    }

    /// Fire armed wakeups until the engine reaches `phase`.
    ///
    /// Returns false if `max_steps` wakeups did not get there.
    pub async fn run_until(&self, phase: Phase, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if self.phase().await == phase {
                return true;
            }
            if self.fire_last().await.is_none() {
                return false;
            }
        }
        self.phase().await == phase
    }
}
