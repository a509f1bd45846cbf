//! Hippodrome - a timed horse-race betting engine.
//!
//! Races run in a fixed cycle: a betting window opens with a fresh field of
//! participants and house odds, bets are debited from a ledger as they are
//! placed, a countdown lines the field up, a random-stride simulator runs the
//! race tick by tick, and winning bets are credited before a cool-down opens
//! the next window. Admins start and pause the cycle; a pause requested
//! mid-race takes effect once that race is settled.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Pure types and algorithms: phases, participants, odds,
//!   bets, the track simulator
//! - **`port`** - Traits at the boundary: `Ledger`, `Broadcaster`,
//!   `IdentityResolver`, `Scheduler`
//! - **`application`** - The `RaceEngine` state machine and the `RaceDesk`
//!   control surface
//! - **`adapter`** - In-memory ledger, broadcast channel, token identity,
//!   tokio timers, the CLI
//! - **`infrastructure`** - Configuration and runtime wiring
//!
//! # Features
//!
//! - `testkit` - Test doubles (manual scheduler, recording broadcaster,
//!   flaky ledgers) for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hippodrome::adapter::inbound::scheduler::TokioScheduler;
//! use hippodrome::adapter::outbound::memory_ledger::MemoryLedger;
//! use hippodrome::application::engine::RaceEngine;
//! use hippodrome::domain::UserId;
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let ledger = Arc::new(MemoryLedger::with_accounts([(UserId::from("ana"), Decimal::from(100))]));
//! let (scheduler, wakeups) = TokioScheduler::new();
//! let engine = Arc::new(RaceEngine::builder(ledger, Arc::new(scheduler)).build());
//! tokio::spawn(engine.clone().run(wakeups));
//! engine.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
