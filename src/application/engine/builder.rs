//! Builder for [`RaceEngine`].

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use super::{RaceEngine, RaceSession, RaceTiming, SettlementBackoff};
use crate::domain::{Participant, Track};
use crate::port::inbound::Scheduler;
use crate::port::outbound::{Broadcaster, Ledger, NullBroadcaster};

/// Assembles a [`RaceEngine`]; everything but the ledger and scheduler has
/// a default matching the standard game.
pub struct RaceEngineBuilder {
    ledger: Arc<dyn Ledger>,
    scheduler: Arc<dyn Scheduler>,
    broadcaster: Arc<dyn Broadcaster>,
    catalog: Vec<Participant>,
    track: Track,
    timing: RaceTiming,
    backoff: SettlementBackoff,
    seed: Option<u64>,
}

impl RaceEngineBuilder {
    #[must_use]
    pub fn new(ledger: Arc<dyn Ledger>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            ledger,
            scheduler,
            broadcaster: Arc::new(NullBroadcaster),
            catalog: Participant::default_catalog(),
            track: Track::default(),
            timing: RaceTiming::default(),
            backoff: SettlementBackoff::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn broadcaster(mut self, broadcaster: Arc<dyn Broadcaster>) -> Self {
        self.broadcaster = broadcaster;
        self
    }

    /// Participants entered into every race, in race order.
    #[must_use]
    pub fn catalog(mut self, catalog: Vec<Participant>) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    #[must_use]
    pub fn timing(mut self, timing: RaceTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn backoff(mut self, backoff: SettlementBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Seed the simulator for reproducible races.
    #[must_use]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn build(self) -> RaceEngine {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RaceEngine {
            session: Mutex::new(RaceSession::default()),
            catalog: self.catalog,
            track: self.track,
            timing: self.timing,
            backoff: self.backoff,
            ledger: self.ledger,
            broadcaster: self.broadcaster,
            scheduler: self.scheduler,
            rng: parking_lot::Mutex::new(rng),
        }
    }
}
