//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the race engine. They are traits
//! that adapters implement to integrate with the systems around it.
//!
//! # Architecture
//!
//! ```text
//!     ┌──────────┐   ┌───────────┐   ┌─────────────────────────┐
//!     │ Identity │   │ Scheduler │──▶│       RaceEngine         │
//!     │ Adapter  │   │  Adapter  │   │  (session + transitions) │
//!     └──────────┘   └───────────┘   └─────────────────────────┘
//!                                       │                 │
//!                                       ▼                 ▼
//!                                 ┌──────────┐     ┌─────────────┐
//!                                 │  Ledger  │     │ Broadcaster │
//!                                 │ Adapter  │     │   Adapter   │
//!                                 └──────────┘     └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`inbound::IdentityResolver`] - Caller identity and admin role
//! - [`inbound::Scheduler`] - Delayed wakeups driving phase transitions
//! - [`outbound::Ledger`] - User balances (read, conditional debit, credit)
//! - [`outbound::Broadcaster`] - Phase, position and result announcements

pub mod inbound;
pub mod outbound;
