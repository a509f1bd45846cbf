//! The live race session and its phase-transition handlers.
//!
//! Handlers mutate the session and return a [`Step`]: the events to
//! announce, the next timer to arm, and whether payouts must be applied.
//! They never perform I/O, so the whole state machine can be exercised
//! without a clock or a ledger.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::{
    enter_field, payouts, settle, starting_grid, Amount, Bet, Participant, ParticipantId, Payout,
    Phase, Position, RaceParticipant, Track,
};
use crate::port::inbound::{Timer, Wakeup};
use crate::port::outbound::{PhaseChange, PhasePayload, PositionsUpdate, RaceEvent, RaceResult};

/// Outcome of one transition handler.
#[derive(Debug, Default)]
pub(crate) struct Step {
    pub events: Vec<RaceEvent>,
    pub arm: Option<Timer>,
    pub settle: bool,
}

impl Step {
    fn arm(timer: Timer) -> Self {
        Self {
            arm: Some(timer),
            ..Self::default()
        }
    }

    /// Apply outstanding payouts, nothing else.
    pub fn settle() -> Self {
        Self {
            settle: true,
            ..Self::default()
        }
    }

    fn with_event(mut self, event: RaceEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Point-in-time view of the race for status queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceStatus {
    pub race_id: u64,
    pub phase: Phase,
    /// Present in every phase except `PAUSED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<RaceParticipant>>,
    /// Present only while `RACING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Position>>,
    pub pause_pending: bool,
}

/// Phase, field, bets and positions of the one race in flight.
#[derive(Debug, Default)]
pub struct RaceSession {
    phase: Phase,
    race_id: u64,
    field: Vec<RaceParticipant>,
    bets: Vec<Bet>,
    positions: Vec<Position>,
    pause_pending: bool,
    epoch: u64,
    window_extensions: u32,
    winner: Option<RaceParticipant>,
    payouts: Vec<Payout>,
    owed: Vec<Payout>,
    settlement_attempts: u32,
}

impl RaceSession {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn race_id(&self) -> u64 {
        self.race_id
    }

    #[must_use]
    pub fn field(&self) -> &[RaceParticipant] {
        &self.field
    }

    #[must_use]
    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn pause_pending(&self) -> bool {
        self.pause_pending
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// How many times the current betting window was extended for lack of bets.
    #[must_use]
    pub fn window_extensions(&self) -> u32 {
        self.window_extensions
    }

    #[must_use]
    pub fn winner(&self) -> Option<&RaceParticipant> {
        self.winner.as_ref()
    }

    /// Payouts not yet accepted by the ledger.
    #[must_use]
    pub fn owed(&self) -> &[Payout] {
        &self.owed
    }

    #[must_use]
    pub fn settlement_attempts(&self) -> u32 {
        self.settlement_attempts
    }

    #[must_use]
    pub fn has_entrant(&self, participant: &ParticipantId) -> bool {
        self.field.iter().any(|horse| horse.id() == participant)
    }

    #[must_use]
    pub fn status(&self) -> RaceStatus {
        RaceStatus {
            race_id: self.race_id,
            phase: self.phase,
            participants: self.phase.has_field().then(|| self.field.clone()),
            positions: (self.phase == Phase::Racing).then(|| self.positions.clone()),
            pause_pending: self.pause_pending,
        }
    }

    /// Arm `timer`, invalidating whatever timer was armed before.
    pub(crate) fn arm(&mut self, timer: Timer, delay: Duration) -> Wakeup {
        self.epoch += 1;
        Wakeup {
            timer,
            epoch: self.epoch,
            delay,
        }
    }

    #[must_use]
    pub(crate) fn is_current(&self, wakeup: &Wakeup) -> bool {
        wakeup.epoch == self.epoch
    }

    pub(crate) fn record_bet(&mut self, bet: Bet) {
        self.bets.push(bet);
    }

    pub(crate) fn defer_pause(&mut self) {
        self.pause_pending = true;
    }

    /// Set up a new race from the catalog and open betting.
    pub(crate) fn open_betting(&mut self, catalog: &[Participant]) -> Step {
        self.race_id += 1;
        self.field = enter_field(catalog);
        self.bets.clear();
        self.positions.clear();
        self.window_extensions = 0;
        self.winner = None;
        self.payouts.clear();
        self.owed.clear();
        self.settlement_attempts = 0;
        let payload = PhasePayload::Participants(self.field.clone());
        Step::arm(Timer::BettingWindow).with_event(self.enter(Phase::OpenToBets, payload))
    }

    /// Betting window expired.
    ///
    /// Retry-until-bets policy: with no bets the window is re-armed and the
    /// field and bets are left exactly as they are, so betting stays open
    /// until the first wager lands.
    pub(crate) fn close_betting(&mut self) -> Step {
        if self.bets.is_empty() {
            self.window_extensions += 1;
            debug!(
                race_id = self.race_id,
                extensions = self.window_extensions,
                "No bets placed, extending betting window"
            );
            return Step::arm(Timer::BettingWindow);
        }

        self.positions = starting_grid(&self.field);
        let payload = PhasePayload::StartingPositions(self.positions.clone());
        Step::arm(Timer::StartingCountdown).with_event(self.enter(Phase::RaceStarting, payload))
    }

    pub(crate) fn start_racing(&mut self) -> Step {
        Step::arm(Timer::Tick).with_event(self.enter(Phase::Racing, PhasePayload::None))
    }

    /// Advance the race one tick; finishes it when a winner appears.
    pub(crate) fn tick<R: Rng>(&mut self, track: &Track, rng: &mut R) -> Step {
        let leader = track.advance(&mut self.positions, rng);
        let update = RaceEvent::PositionsUpdated(PositionsUpdate {
            race_id: self.race_id,
            positions: self.positions.clone(),
        });
        match leader {
            Some(winner) => {
                let mut step = self.finish(&winner);
                step.events.insert(0, update);
                step
            }
            None => Step::arm(Timer::Tick).with_event(update),
        }
    }

    fn finish(&mut self, winner: &ParticipantId) -> Step {
        let Some(horse) = self.field.iter().find(|horse| horse.id() == winner).cloned() else {
            error!(race_id = self.race_id, winner = %winner, "Winner is not in the field");
            return Step::arm(Timer::Tick);
        };

        self.payouts = payouts(settle(&self.bets, horse.id(), horse.odds));
        self.owed = self.payouts.clone();
        self.winner = Some(horse);
        // No timer is armed here, which cancels the tick.
        Step::settle().with_event(self.enter(Phase::RaceFinished, PhasePayload::None))
    }

    /// Hand the outstanding payouts to the engine for crediting.
    pub(crate) fn take_owed(&mut self) -> Vec<Payout> {
        std::mem::take(&mut self.owed)
    }

    /// Record a settlement attempt. `unpaid` is whatever the ledger refused.
    ///
    /// The result is announced after the first attempt. The cool-down only
    /// starts once nothing is owed; until then a retry timer is armed.
    pub(crate) fn settlement_done(&mut self, unpaid: Vec<Payout>) -> Step {
        self.settlement_attempts += 1;
        let mut step = Step::default();
        if self.settlement_attempts == 1 {
            if let Some(winner) = self.winner.clone() {
                step.events.push(RaceEvent::RaceResult(RaceResult {
                    race_id: self.race_id,
                    winner,
                    payouts: self.payouts.clone(),
                }));
            }
        }

        if unpaid.is_empty() {
            step.arm = Some(Timer::CoolDown);
        } else {
            self.owed = unpaid;
            step.arm = Some(Timer::SettlementRetry);
        }
        step
    }

    /// Cool-down expired: honour a pending pause, otherwise start the next race.
    pub(crate) fn cool_down(&mut self, catalog: &[Participant]) -> Step {
        if self.pause_pending {
            return self.pause();
        }
        self.open_betting(catalog)
    }

    /// Stop the cycle now, cancelling any armed timer.
    pub(crate) fn pause(&mut self) -> Step {
        self.epoch += 1;
        self.pause_pending = false;
        self.field.clear();
        self.bets.clear();
        self.positions.clear();
        Step::default().with_event(self.enter(Phase::Paused, PhasePayload::None))
    }

    /// Total owed but not yet credited.
    #[must_use]
    pub fn owed_total(&self) -> Amount {
        self.owed.iter().map(|payout| payout.amount).sum()
    }

    fn enter(&mut self, phase: Phase, payload: PhasePayload) -> RaceEvent {
        info!(race_id = self.race_id, from = %self.phase, to = %phase, "Phase transition");
        self.phase = phase;
        RaceEvent::PhaseChanged(PhaseChange {
            race_id: self.race_id,
            phase,
            payload,
            at: Utc::now(),
        })
    }
}
