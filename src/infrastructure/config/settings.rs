//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; an empty file yields the standard game: four
//! horses, one-minute betting windows, no accounts and no credentials.
//!
//! # Example
//!
//! ```no_run
//! use hippodrome::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("hippodrome.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::logging::LoggingConfig;
use super::roster::{default_participants, AccountConfig, IdentityConfig, ParticipantConfig};
use super::settlement::SettlementConfig;
use super::timing::TimingConfig;
use super::track::TrackConfig;
use crate::domain::Participant;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Phase durations.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Race distance and stride range.
    #[serde(default)]
    pub track: TrackConfig,

    /// Payout retry backoff.
    #[serde(default)]
    pub settlement: SettlementConfig,

    /// Participant catalog, in race order.
    #[serde(default = "default_participants")]
    pub participants: Vec<ParticipantConfig>,

    /// Opening ledger balances.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Static credentials.
    #[serde(default)]
    pub identities: Vec<IdentityConfig>,

    /// Fixed simulator seed. Races are random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            timing: TimingConfig::default(),
            track: TrackConfig::default(),
            settlement: SettlementConfig::default(),
            participants: default_participants(),
            accounts: Vec::new(),
            identities: Vec::new(),
            seed: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        for (field, value) in self.timing.fields() {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.track.distance == 0 {
            return Err(ConfigError::InvalidValue {
                field: "distance",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.track.min_stride == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_stride",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.track.max_stride < self.track.min_stride {
            return Err(ConfigError::InvalidValue {
                field: "max_stride",
                reason: "must be >= min_stride".to_string(),
            }
            .into());
        }

        if self.settlement.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.settlement.max_delay_ms < self.settlement.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= initial_delay_ms".to_string(),
            }
            .into());
        }
        let multiplier = self.settlement.backoff_multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be a finite number >= 1.0".to_string(),
            }
            .into());
        }

        if self.participants.is_empty() {
            return Err(ConfigError::MissingField {
                field: "participants",
            }
            .into());
        }
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if participant.id.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "participants.id",
                }
                .into());
            }
            if !seen.insert(participant.id.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "participants.id",
                    reason: format!("duplicate participant id {}", participant.id),
                }
                .into());
            }
        }

        let mut users = HashSet::new();
        for account in &self.accounts {
            if !users.insert(account.user.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "accounts.user",
                    reason: format!("duplicate account {}", account.user),
                }
                .into());
            }
            if account.balance < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "accounts.balance",
                    reason: format!("balance of {} must be 0 or greater", account.user),
                }
                .into());
            }
        }

        for identity in &self.identities {
            if identity.token.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "identities.token",
                }
                .into());
            }
        }

        Ok(())
    }

    /// Participant catalog in race order.
    #[must_use]
    pub fn catalog(&self) -> Vec<Participant> {
        self.participants.iter().map(Participant::from).collect()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
