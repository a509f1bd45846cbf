//! Flat race odds and payout computation.
//!
//! Every participant in a race shares one multiplier,
//! `participant_count × 0.9`. This is a house simplification rather than a
//! per-horse risk price.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::Bet;
use super::id::{ParticipantId, UserId};
use super::money::{Amount, Odds};

/// House factor applied per participant (0.9).
pub const HOUSE_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Payout multiplier for a race with `participant_count` entrants.
#[must_use]
pub fn compute_odds(participant_count: usize) -> Odds {
    Decimal::from(participant_count as u64) * HOUSE_FACTOR
}

/// An amount owed to one user after a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub user: UserId,
    pub amount: Amount,
}

/// Compute what each user is owed for a finished race.
///
/// Only bets on `winner` pay, at `amount × odds`, summed per user. Losing
/// stakes are not returned; they were debited when the bet was placed, so a
/// winning payout already includes the stake.
#[must_use]
pub fn settle(bets: &[Bet], winner: &ParticipantId, odds: Odds) -> BTreeMap<UserId, Amount> {
    bets.iter()
        .filter(|bet| &bet.participant == winner)
        .fold(BTreeMap::new(), |mut owed, bet| {
            *owed.entry(bet.user.clone()).or_insert(Decimal::ZERO) += bet.amount * odds;
            owed
        })
}

/// Flatten a settlement map into payout records.
#[must_use]
pub fn payouts(owed: BTreeMap<UserId, Amount>) -> Vec<Payout> {
    owed.into_iter()
        .map(|(user, amount)| Payout { user, amount })
        .collect()
}
