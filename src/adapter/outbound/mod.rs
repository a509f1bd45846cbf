//! Outbound adapters (driven side).

pub mod channel;
pub mod memory_ledger;
