use thiserror::Error;

use crate::domain::{Amount, ParticipantId, Phase, UserId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Admin control rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("cannot {action} while {phase}")]
    InvalidPhaseTransition { phase: Phase, action: &'static str },

    #[error("pause already scheduled")]
    PauseAlreadyScheduled,
}

/// Failures reported by a ledger implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance for {user}: {available} < {requested}")]
    InsufficientBalance {
        user: UserId,
        available: Amount,
        requested: Amount,
    },

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Bet placement rejections. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("betting is closed while {0}")]
    PhaseNotOpen(Phase),

    #[error("invalid bet data: {reason}")]
    InvalidBetData { reason: &'static str },

    #[error("participant {0} is not in the race")]
    ParticipantNotInRace(ParticipantId),

    #[error("insufficient balance: {available} < {requested}")]
    InsufficientBalance { available: Amount, requested: Amount },

    #[error(transparent)]
    Ledger(LedgerError),
}

impl From<LedgerError> for BetError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                available,
                requested,
                ..
            } => Self::InsufficientBalance {
                available,
                requested,
            },
            other => Self::Ledger(other),
        }
    }
}

/// Caller identity failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("admin role required")]
    Forbidden,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Bet(#[from] BetError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
