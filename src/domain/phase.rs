//! Lifecycle phase of the race cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of the race cycle. Exactly one is current at any instant.
///
/// ```text
/// PAUSED -> OPEN_TO_BETS -> RACE_STARTING -> RACING -> RACE_FINISHED
///               ^  |                                        |
///               +--+ (no bets yet)                          |
///               +-------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// The cycle is stopped; no race is set up.
    #[default]
    Paused,
    /// Participants are announced and wagers are accepted.
    OpenToBets,
    /// Betting is closed; countdown before the start.
    RaceStarting,
    /// Positions advance once per tick.
    Racing,
    /// A winner is known; payouts are settled, then a cool-down runs.
    RaceFinished,
}

impl Phase {
    /// Stable name used in logs and wire payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paused => "PAUSED",
            Self::OpenToBets => "OPEN_TO_BETS",
            Self::RaceStarting => "RACE_STARTING",
            Self::Racing => "RACING",
            Self::RaceFinished => "RACE_FINISHED",
        }
    }

    /// True while a race is set up (every phase except [`Phase::Paused`]).
    #[must_use]
    pub const fn has_field(self) -> bool {
        !matches!(self, Self::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_screaming_snake_case() {
        let json = serde_json::to_string(&Phase::OpenToBets).unwrap();
        assert_eq!(json, "\"OPEN_TO_BETS\"");
        assert_eq!(Phase::RaceFinished.to_string(), "RACE_FINISHED");
    }

    #[test]
    fn only_paused_has_no_field() {
        assert!(!Phase::Paused.has_field());
        assert!(Phase::OpenToBets.has_field());
        assert!(Phase::Racing.has_field());
    }

    #[test]
    fn default_is_paused() {
        assert_eq!(Phase::default(), Phase::Paused);
    }
}
