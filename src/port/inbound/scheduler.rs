//! Scheduler port: delayed wakeups that drive the race state machine.
//!
//! The engine never sleeps itself. It asks a [`Scheduler`] to deliver a
//! [`Wakeup`] after a delay, and the driver hands delivered wakeups back to
//! `RaceEngine::fire`. Tests substitute a scheduler that only records.

use std::fmt;
use std::time::Duration;

/// Phase-transition timers armed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// End of the betting window (or of an extended window).
    BettingWindow,
    /// Countdown between closing bets and the start.
    StartingCountdown,
    /// One simulation step.
    Tick,
    /// Retry of payouts the ledger refused.
    SettlementRetry,
    /// Pause between a finished race and the next betting window.
    CoolDown,
}

impl Timer {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BettingWindow => "betting_window",
            Self::StartingCountdown => "starting_countdown",
            Self::Tick => "tick",
            Self::SettlementRetry => "settlement_retry",
            Self::CoolDown => "cool_down",
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timer armed for one session epoch.
///
/// Arming a new timer advances the epoch, so a wakeup that arrives after
/// its timer was replaced or cancelled is recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wakeup {
    pub timer: Timer,
    pub epoch: u64,
    pub delay: Duration,
}

/// Delivers wakeups after their delay.
///
/// Implementations must not call back into the engine synchronously from
/// `schedule`; it is invoked while the session lock is held.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, wakeup: Wakeup);
}
