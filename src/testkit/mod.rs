//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`scheduler`] - `ManualScheduler`: records wakeups, tests fire them.
//! - [`broadcast`] - `RecordingBroadcaster`: keeps every announced event.
//! - [`ledger`] - `FlakyLedger` and `SlowLedger` wrappers around the
//!   in-memory ledger.
//! - [`race`] - `TestRace`: an engine wired to the doubles above.
//! - [`config`] - Canonical fast timings and sample configuration.

pub mod broadcast;
pub mod config;
pub mod ledger;
pub mod race;
pub mod scheduler;
