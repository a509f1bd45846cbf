//! Accepted wagers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ParticipantId, UserId};
use super::money::Amount;

/// A wager accepted during the betting window.
///
/// Immutable once recorded; discarded when the next race is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub user: UserId,
    pub participant: ParticipantId,
    pub amount: Amount,
}

impl Bet {
    #[must_use]
    pub const fn new(user: UserId, participant: ParticipantId, amount: Amount) -> Self {
        Self {
            user,
            participant,
            amount,
        }
    }
}

/// Total stake across a set of bets.
#[must_use]
pub fn total_staked(bets: &[Bet]) -> Amount {
    bets.iter().map(|bet| bet.amount).sum::<Decimal>()
}
