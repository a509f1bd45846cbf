//! Phase timer configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::application::engine::RaceTiming;

/// Durations of the timed phases, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Betting window length.
    #[serde(default = "default_betting_window_ms")]
    pub betting_window_ms: u64,
    /// Re-arm interval when a window closes with no bets.
    #[serde(default = "default_empty_window_retry_ms")]
    pub empty_window_retry_ms: u64,
    /// Countdown before the race starts.
    #[serde(default = "default_starting_countdown_ms")]
    pub starting_countdown_ms: u64,
    /// Interval between simulation ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Pause between races.
    #[serde(default = "default_cool_down_ms")]
    pub cool_down_ms: u64,
}

const fn default_betting_window_ms() -> u64 {
    60_000
}

const fn default_empty_window_retry_ms() -> u64 {
    60_000
}

const fn default_starting_countdown_ms() -> u64 {
    5_000
}

const fn default_tick_ms() -> u64 {
    1_000
}

const fn default_cool_down_ms() -> u64 {
    10_000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            betting_window_ms: default_betting_window_ms(),
            empty_window_retry_ms: default_empty_window_retry_ms(),
            starting_countdown_ms: default_starting_countdown_ms(),
            tick_ms: default_tick_ms(),
            cool_down_ms: default_cool_down_ms(),
        }
    }
}

impl TimingConfig {
    /// Each field paired with its name, for validation.
    pub(crate) fn fields(&self) -> [(&'static str, u64); 5] {
        [
            ("betting_window_ms", self.betting_window_ms),
            ("empty_window_retry_ms", self.empty_window_retry_ms),
            ("starting_countdown_ms", self.starting_countdown_ms),
            ("tick_ms", self.tick_ms),
            ("cool_down_ms", self.cool_down_ms),
        ]
    }
}

impl From<&TimingConfig> for RaceTiming {
    fn from(config: &TimingConfig) -> Self {
        Self {
            betting_window: Duration::from_millis(config.betting_window_ms),
            empty_window_retry: Duration::from_millis(config.empty_window_retry_ms),
            starting_countdown: Duration::from_millis(config.starting_countdown_ms),
            tick: Duration::from_millis(config.tick_ms),
            cool_down: Duration::from_millis(config.cool_down_ms),
        }
    }
}
