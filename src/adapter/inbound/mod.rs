//! Inbound adapters (driving side).

pub mod cli;
pub mod identity;
pub mod scheduler;
