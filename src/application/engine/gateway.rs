//! Betting gateway: validates a wager and records it against the session.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{RaceEngine, RaceSession};
use crate::domain::{Amount, Bet, ParticipantId, Phase, UserId};
use crate::error::BetError;

impl RaceEngine {
    /// Place a bet for `user` on `participant`.
    ///
    /// Checks run in order: betting is open, the amount is positive, the
    /// participant is in this race, the balance covers the stake. The stake is
    /// then debited and the bet recorded. The session lock is held across the
    /// whole sequence, and the debit itself is conditional, so two concurrent
    /// bets can never overdraw one account.
    ///
    /// # Errors
    ///
    /// [`BetError::PhaseNotOpen`], [`BetError::InvalidBetData`],
    /// [`BetError::ParticipantNotInRace`], [`BetError::InsufficientBalance`],
    /// or [`BetError::Ledger`] if the ledger could not be reached. No money
    /// moves on any error.
    pub async fn place_bet(
        &self,
        user: &UserId,
        participant: &ParticipantId,
        amount: Amount,
    ) -> Result<Bet, BetError> {
        let mut session = self.session.lock().await;
        let result = self.accept(&mut session, user, participant, amount).await;
        match &result {
            Ok(bet) => info!(
                race_id = session.race_id(),
                user = %bet.user,
                participant = %bet.participant,
                amount = %bet.amount,
                "Bet accepted"
            ),
            Err(err) => debug!(
                race_id = session.race_id(),
                user = %user,
                participant = %participant,
                amount = %amount,
                error = %err,
                "Bet rejected"
            ),
        }
        result
    }

    async fn accept(
        &self,
        session: &mut RaceSession,
        user: &UserId,
        participant: &ParticipantId,
        amount: Amount,
    ) -> Result<Bet, BetError> {
        if session.phase() != Phase::OpenToBets {
            return Err(BetError::PhaseNotOpen(session.phase()));
        }
        if participant.as_str().is_empty() {
            return Err(BetError::InvalidBetData {
                reason: "participant is required",
            });
        }
        if amount <= Decimal::ZERO {
            return Err(BetError::InvalidBetData {
                reason: "amount must be positive",
            });
        }
        if !session.has_entrant(participant) {
            return Err(BetError::ParticipantNotInRace(participant.clone()));
        }

        let available = self.ledger.balance(user).await.map_err(BetError::Ledger)?;
        if available < amount {
            return Err(BetError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        self.ledger.try_debit(user, amount).await?;

        let bet = Bet::new(user.clone(), participant.clone(), amount);
        session.record_bet(bet.clone());
        Ok(bet)
    }
}
