//! Canonical test configurations.

use std::time::Duration;

use crate::application::engine::{RaceTiming, SettlementBackoff};

/// Millisecond timings for tests that run real timers.
pub fn fast_timing() -> RaceTiming {
    RaceTiming {
        betting_window: Duration::from_millis(40),
        empty_window_retry: Duration::from_millis(20),
        starting_countdown: Duration::from_millis(5),
        tick: Duration::from_millis(1),
        cool_down: Duration::from_millis(20),
    }
}

/// Backoff with millisecond delays.
pub fn fast_backoff() -> SettlementBackoff {
    SettlementBackoff {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
        multiplier: 2.0,
    }
}

/// A complete configuration file: two horses, two bettors, one admin.
pub const SAMPLE_TOML: &str = r#"
seed = 42

[logging]
level = "warn"
format = "pretty"

[timing]
betting_window_ms = 40
empty_window_retry_ms = 20
starting_countdown_ms = 5
tick_ms = 1
cool_down_ms = 20

[track]
distance = 20
min_stride = 5
max_stride = 10

[[participants]]
id = "1"
name = "Pernambuco"

[[participants]]
id = "2"
name = "Marquinhos"

[[accounts]]
user = "ana"
balance = "100"

[[accounts]]
user = "bia"
balance = "50"

[[identities]]
token = "root"
user = "admin"
admin = true

[[identities]]
token = "t-ana"
user = "ana"

[[identities]]
token = "t-bia"
user = "bia"
"#;
