//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the balance store and the event transport.

pub mod broadcast;
pub mod ledger;

pub use broadcast::{
    Broadcaster, BroadcasterRegistry, LogBroadcaster, NullBroadcaster, PhaseChange, PhasePayload,
    PositionsUpdate, RaceEvent, RaceResult,
};
pub use ledger::Ledger;
