//! Control surfaces of the race: admin and user operations behind identity
//! checks.
//!
//! Transport layers (HTTP routes, sockets, the console) resolve nothing
//! themselves; they hand the raw credential to [`RaceDesk`], which resolves
//! the caller, enforces the admin role where needed and calls the engine.

use std::sync::Arc;

use crate::application::engine::{PauseOutcome, RaceEngine, RaceStatus};
use crate::domain::{Amount, Bet, ParticipantId};
use crate::error::Result;
use crate::port::inbound::{Caller, IdentityResolver};
use crate::port::outbound::Ledger;

/// Front desk for admins and bettors.
pub struct RaceDesk {
    engine: Arc<RaceEngine>,
    identity: Arc<dyn IdentityResolver>,
    ledger: Arc<dyn Ledger>,
}

impl RaceDesk {
    pub fn new(
        engine: Arc<RaceEngine>,
        identity: Arc<dyn IdentityResolver>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        Self {
            engine,
            identity,
            ledger,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Arc<RaceEngine> {
        &self.engine
    }

    /// Admin: start the race cycle.
    pub async fn start(&self, credential: &str) -> Result<()> {
        self.admin(credential)?;
        self.engine.start().await?;
        Ok(())
    }

    /// Admin: pause now or after the current race.
    pub async fn pause(&self, credential: &str) -> Result<PauseOutcome> {
        self.admin(credential)?;
        Ok(self.engine.request_pause().await?)
    }

    /// User: wager `amount` on `participant`.
    pub async fn place_bet(
        &self,
        credential: &str,
        participant: &ParticipantId,
        amount: Amount,
    ) -> Result<Bet> {
        let caller = self.identity.resolve(credential)?;
        Ok(self
            .engine
            .place_bet(&caller.user, participant, amount)
            .await?)
    }

    /// User: current race status.
    pub async fn status(&self, credential: &str) -> Result<RaceStatus> {
        self.identity.resolve(credential)?;
        Ok(self.engine.status().await)
    }

    /// User: own balance.
    pub async fn balance(&self, credential: &str) -> Result<Amount> {
        let caller = self.identity.resolve(credential)?;
        Ok(self.ledger.balance(&caller.user).await?)
    }

    fn admin(&self, credential: &str) -> Result<Caller> {
        let caller = self.identity.resolve(credential)?;
        caller.require_admin()?;
        Ok(caller)
    }
}
