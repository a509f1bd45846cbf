//! Participants, opening balances and credentials.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Amount, Participant, UserId};

/// One entry of the participant catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantConfig {
    pub id: String,
    pub name: String,
}

impl From<&ParticipantConfig> for Participant {
    fn from(config: &ParticipantConfig) -> Self {
        Participant::new(config.id.as_str(), config.name.as_str())
    }
}

/// Opening balance of a ledger account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub user: String,
    #[serde(default = "default_balance")]
    pub balance: Amount,
}

fn default_balance() -> Amount {
    Decimal::ONE_THOUSAND
}

impl AccountConfig {
    #[must_use]
    pub fn entry(&self) -> (UserId, Amount) {
        (UserId::from(self.user.as_str()), self.balance)
    }
}

/// A static credential.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub token: String,
    pub user: String,
    #[serde(default)]
    pub admin: bool,
}

pub(crate) fn default_participants() -> Vec<ParticipantConfig> {
    Participant::default_catalog()
        .into_iter()
        .map(|participant| ParticipantConfig {
            id: participant.id.as_str().to_string(),
            name: participant.name,
        })
        .collect()
}
