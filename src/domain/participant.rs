//! Horses: the static catalog entry and its per-race instance.

use serde::{Deserialize, Serialize};

use super::id::ParticipantId;
use super::money::Odds;
use super::odds::compute_odds;

/// Static catalog entry, defined at process start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The built-in stable of four horses.
    #[must_use]
    pub fn default_catalog() -> Vec<Self> {
        vec![
            Self::new("1", "Pernambuco"),
            Self::new("2", "Marquinhos"),
            Self::new("3", "Jeba"),
            Self::new("4", "Dinossaura"),
        ]
    }
}

/// A participant entered in one race, carrying that race's payout multiplier.
///
/// Lives for exactly one race and is discarded at the next race setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceParticipant {
    #[serde(flatten)]
    pub participant: Participant,
    pub odds: Odds,
}

impl RaceParticipant {
    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        &self.participant.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.participant.name
    }
}

/// Enter every catalog participant into a new race at the flat race odds.
#[must_use]
pub fn enter_field(catalog: &[Participant]) -> Vec<RaceParticipant> {
    let odds = compute_odds(catalog.len());
    catalog
        .iter()
        .cloned()
        .map(|participant| RaceParticipant { participant, odds })
        .collect()
}
