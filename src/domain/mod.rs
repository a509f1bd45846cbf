//! Race domain: pure types and algorithms with no I/O.

pub mod bet;
pub mod id;
pub mod money;
pub mod odds;
pub mod participant;
pub mod phase;
pub mod race;

pub use bet::{total_staked, Bet};
pub use id::{ParticipantId, UserId};
pub use money::{Amount, Odds};
pub use odds::{compute_odds, payouts, settle, Payout, HOUSE_FACTOR};
pub use participant::{enter_field, Participant, RaceParticipant};
pub use phase::Phase;
pub use race::{starting_grid, Position, Track, MAX_STRIDE, MIN_STRIDE, RACE_DISTANCE};
