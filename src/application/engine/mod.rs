//! Race lifecycle engine.
//!
//! [`RaceEngine`] owns the one live [`RaceSession`] behind a single async
//! mutex. Admin controls, bet placement and timer wakeups all take that lock,
//! so phase changes and bet acceptance are serialized against each other.
//! The lock is held across ledger calls: a bet's balance check, debit and
//! recording happen as one step, and so does settlement.

mod builder;
mod gateway;
mod session;
mod timing;

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::domain::{Amount, Bet, Participant, Payout, Phase, Track};
use crate::error::ControlError;
use crate::port::inbound::{Scheduler, Timer, Wakeup};
use crate::port::outbound::{Broadcaster, Ledger};

pub use builder::RaceEngineBuilder;
pub use session::{RaceSession, RaceStatus};
pub use timing::{RaceTiming, SettlementBackoff};

use session::Step;

/// What a pause request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    /// Stopped immediately (betting was open and nobody had bet).
    Paused,
    /// Will stop once the race in progress has been settled.
    Deferred,
    /// Nothing to do.
    AlreadyPaused,
}

impl PauseOutcome {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Paused => "System paused",
            Self::Deferred => "System will be paused after the current race",
            Self::AlreadyPaused => "System is already paused",
        }
    }
}

/// The race state machine and its collaborators.
pub struct RaceEngine {
    session: Mutex<RaceSession>,
    catalog: Vec<Participant>,
    track: Track,
    timing: RaceTiming,
    backoff: SettlementBackoff,
    ledger: Arc<dyn Ledger>,
    broadcaster: Arc<dyn Broadcaster>,
    scheduler: Arc<dyn Scheduler>,
    rng: parking_lot::Mutex<StdRng>,
}

impl RaceEngine {
    /// Start building an engine around a ledger and a scheduler.
    pub fn builder(ledger: Arc<dyn Ledger>, scheduler: Arc<dyn Scheduler>) -> RaceEngineBuilder {
        RaceEngineBuilder::new(ledger, scheduler)
    }

    /// Open the first betting window. Only valid while paused.
    pub async fn start(&self) -> Result<(), ControlError> {
        let mut session = self.session.lock().await;
        if session.phase() != Phase::Paused {
            return Err(ControlError::InvalidPhaseTransition {
                phase: session.phase(),
                action: "start",
            });
        }
        let step = session.open_betting(&self.catalog);
        self.commit(&mut session, step).await;
        Ok(())
    }

    /// Stop the cycle now if nothing is at stake, otherwise after this race.
    ///
    /// # Errors
    ///
    /// [`ControlError::PauseAlreadyScheduled`] if a deferred pause is pending.
    pub async fn request_pause(&self) -> Result<PauseOutcome, ControlError> {
        let mut session = self.session.lock().await;
        match session.phase() {
            Phase::Paused => Ok(PauseOutcome::AlreadyPaused),
            _ if session.pause_pending() => Err(ControlError::PauseAlreadyScheduled),
            Phase::OpenToBets if session.bets().is_empty() => {
                let step = session.pause();
                self.commit(&mut session, step).await;
                Ok(PauseOutcome::Paused)
            }
            phase => {
                session.defer_pause();
                info!(race_id = session.race_id(), %phase, "Pause scheduled after current race");
                Ok(PauseOutcome::Deferred)
            }
        }
    }

    /// Current phase, field and (while racing) positions.
    pub async fn status(&self) -> RaceStatus {
        self.session.lock().await.status()
    }

    /// Bets accepted for the current race.
    pub async fn bets(&self) -> Vec<Bet> {
        self.session.lock().await.bets().to_vec()
    }

    /// Payouts of the finished race that the ledger has not accepted yet.
    pub async fn owed_payouts(&self) -> Vec<Payout> {
        self.session.lock().await.owed().to_vec()
    }

    /// Sum of stakes accepted for the current race.
    pub async fn staked_total(&self) -> Amount {
        crate::domain::total_staked(self.session.lock().await.bets())
    }

    /// Handle a delivered timer.
    ///
    /// Wakeups from a superseded epoch, or for a timer that does not belong
    /// to the current phase, are dropped.
    pub async fn fire(&self, wakeup: Wakeup) {
        let mut session = self.session.lock().await;
        if !session.is_current(&wakeup) {
            debug!(
                timer = %wakeup.timer,
                epoch = wakeup.epoch,
                current = session.epoch(),
                "Ignoring stale timer"
            );
            return;
        }

        let step = match (wakeup.timer, session.phase()) {
            (Timer::BettingWindow, Phase::OpenToBets) => session.close_betting(),
            (Timer::StartingCountdown, Phase::RaceStarting) => session.start_racing(),
            (Timer::Tick, Phase::Racing) => {
                let mut rng = self.rng.lock();
                session.tick(&self.track, &mut *rng)
            }
            (Timer::SettlementRetry, Phase::RaceFinished) => Step::settle(),
            (Timer::CoolDown, Phase::RaceFinished) => session.cool_down(&self.catalog),
            (timer, phase) => {
                warn!(%timer, %phase, "Timer does not belong to the current phase");
                return;
            }
        };
        self.commit(&mut session, step).await;
    }

    /// Drive the engine from a wakeup channel until it closes.
    pub async fn run(self: Arc<Self>, mut wakeups: mpsc::UnboundedReceiver<Wakeup>) {
        while let Some(wakeup) = wakeups.recv().await {
            self.fire(wakeup).await;
        }
        debug!("Wakeup channel closed, engine driver stopping");
    }

    /// Announce a step's events, arm its timer and run settlement when asked.
    async fn commit(&self, session: &mut RaceSession, mut step: Step) {
        loop {
            for event in step.events.drain(..) {
                self.broadcaster.announce(event);
            }
            if let Some(timer) = step.arm {
                let wakeup = session.arm(timer, self.delay_for(timer, session));
                self.scheduler.schedule(wakeup);
            }
            if !step.settle {
                return;
            }
            step = self.settle(session).await;
        }
    }

    fn delay_for(&self, timer: Timer, session: &RaceSession) -> std::time::Duration {
        match timer {
            Timer::BettingWindow if session.window_extensions() > 0 => {
                self.timing.empty_window_retry
            }
            Timer::BettingWindow => self.timing.betting_window,
            Timer::StartingCountdown => self.timing.starting_countdown,
            Timer::Tick => self.timing.tick,
            Timer::SettlementRetry => self.backoff.delay(session.settlement_attempts()),
            Timer::CoolDown => self.timing.cool_down,
        }
    }

    /// Credit every outstanding payout. Refused credits stay owed.
    async fn settle(&self, session: &mut RaceSession) -> Step {
        let race_id = session.race_id();
        let mut unpaid = Vec::new();
        for payout in session.take_owed() {
            match self.ledger.credit(&payout.user, payout.amount).await {
                Ok(balance) => {
                    info!(
                        race_id,
                        user = %payout.user,
                        amount = %payout.amount,
                        balance = %balance,
                        "Payout credited"
                    );
                }
                Err(err) => {
                    warn!(
                        race_id,
                        user = %payout.user,
                        amount = %payout.amount,
                        error = %err,
                        "Payout credit failed, will retry"
                    );
                    unpaid.push(payout);
                }
            }
        }
        session.settlement_done(unpaid)
    }
}
