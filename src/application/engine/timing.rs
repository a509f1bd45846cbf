//! Timer durations and settlement backoff.

use std::time::Duration;

/// How long each timed phase lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceTiming {
    /// Length of a fresh betting window.
    pub betting_window: Duration,
    /// Re-arm interval when a window closes with no bets.
    pub empty_window_retry: Duration,
    /// Countdown between closing bets and the start.
    pub starting_countdown: Duration,
    /// Interval between simulation ticks.
    pub tick: Duration,
    /// Pause between a settled race and the next betting window.
    pub cool_down: Duration,
}

impl Default for RaceTiming {
    fn default() -> Self {
        Self {
            betting_window: Duration::from_secs(60),
            empty_window_retry: Duration::from_secs(60),
            starting_countdown: Duration::from_secs(5),
            tick: Duration::from_secs(1),
            cool_down: Duration::from_secs(10),
        }
    }
}

/// Exponential backoff for payouts the ledger refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlementBackoff {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl SettlementBackoff {
    /// Delay before retry number `attempt` (1-based), capped at `max_delay`.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let millis = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }
}

impl Default for SettlementBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let backoff = SettlementBackoff::default();

        assert_eq!(backoff.delay(1), Duration::from_millis(500));
        assert_eq!(backoff.delay(2), Duration::from_millis(1000));
        assert_eq!(backoff.delay(4), Duration::from_millis(4000));
        assert_eq!(backoff.delay(20), Duration::from_secs(30));
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn standard_timing() {
        let timing = RaceTiming::default();
        assert_eq!(timing.betting_window, Duration::from_secs(60));
        assert_eq!(timing.cool_down, Duration::from_secs(10));
    }
}
