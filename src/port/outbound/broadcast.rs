//! Broadcast port for race events.
//!
//! This module defines the trait for announcing phase changes, position
//! updates and results to spectators. Delivery is fire-and-forget: the engine
//! never waits for an acknowledgement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Payout, Phase, Position, RaceParticipant};

/// Events announced by the race engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaceEvent {
    /// The engine entered a new phase.
    PhaseChanged(PhaseChange),
    /// Positions after one simulation tick.
    PositionsUpdated(PositionsUpdate),
    /// A winner was determined and payouts computed.
    RaceResult(RaceResult),
}

impl RaceEvent {
    /// Race number the event belongs to.
    #[must_use]
    pub const fn race_id(&self) -> u64 {
        match self {
            Self::PhaseChanged(e) => e.race_id,
            Self::PositionsUpdated(e) => e.race_id,
            Self::RaceResult(e) => e.race_id,
        }
    }
}

/// Phase change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    /// Race number (0 before the first race).
    pub race_id: u64,
    /// The phase just entered.
    pub phase: Phase,
    /// Phase-specific data.
    pub payload: PhasePayload,
    /// When the transition happened.
    pub at: DateTime<Utc>,
}

/// Data attached to a phase change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePayload {
    /// Nothing beyond the phase itself.
    None,
    /// The field entered for betting, with odds.
    Participants(Vec<RaceParticipant>),
    /// The grid as the countdown begins.
    StartingPositions(Vec<Position>),
}

/// Position update event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsUpdate {
    pub race_id: u64,
    pub positions: Vec<Position>,
}

/// Race result event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: u64,
    /// The winning horse.
    pub winner: RaceParticipant,
    /// What each winning bettor is owed.
    pub payouts: Vec<Payout>,
}

/// Trait for race event sinks.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `announce` is called while the engine holds its session lock; it must
///   return quickly and never block on a slow consumer
pub trait Broadcaster: Send + Sync {
    /// Handle an event.
    fn announce(&self, event: RaceEvent);
}

/// Registry of broadcasters (composite pattern).
///
/// Forwards events to all registered broadcasters.
pub struct BroadcasterRegistry {
    broadcasters: Vec<Box<dyn Broadcaster>>,
}

impl BroadcasterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            broadcasters: vec![],
        }
    }

    /// Register a broadcaster.
    pub fn register(&mut self, broadcaster: Box<dyn Broadcaster>) {
        self.broadcasters.push(broadcaster);
    }

    /// Number of registered broadcasters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.broadcasters.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.broadcasters.is_empty()
    }
}

impl Default for BroadcasterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for BroadcasterRegistry {
    fn announce(&self, event: RaceEvent) {
        for broadcaster in &self.broadcasters {
            broadcaster.announce(event.clone());
        }
    }
}

/// A no-op broadcaster for when nobody is watching.
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn announce(&self, _event: RaceEvent) {}
}

/// A broadcaster that writes events to the log via tracing.
pub struct LogBroadcaster;

impl Broadcaster for LogBroadcaster {
    fn announce(&self, event: RaceEvent) {
        use tracing::{debug, info};
        match event {
            RaceEvent::PhaseChanged(e) => {
                info!(race_id = e.race_id, phase = %e.phase, "Phase changed");
            }
            RaceEvent::PositionsUpdated(e) => {
                let leader = e.positions.iter().max_by_key(|p| p.position);
                debug!(
                    race_id = e.race_id,
                    leader = leader.map(|p| p.participant.as_str()),
                    lead = leader.map(|p| p.position),
                    "Positions updated"
                );
            }
            RaceEvent::RaceResult(e) => {
                info!(
                    race_id = e.race_id,
                    winner = %e.winner.id(),
                    name = e.winner.name(),
                    winners = e.payouts.len(),
                    "Race result"
                );
            }
        }
    }
}
