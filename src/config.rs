//! # Ledger Configuration
//!
//! Deployment settings for the ledger, resolved in layers:
//!
//! 1. Defaults
//! 2. Optional TOML file
//! 3. Environment variables (highest priority)
//!
//! ```toml
//! tariff_unit = "per_hour"        # per_minute | per_hour
//! tariff_default = "10.00"
//! recompute_interval_secs = 1
//! removal_policy = "require_idle" # allow | require_idle | force_close
//! default_client_name = "Guest"
//! event_capacity = 256
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `BILLIARD_TARIFF_UNIT` | `tariff_unit` |
//! | `BILLIARD_TARIFF_DEFAULT` | `tariff_default` |
//! | `BILLIARD_RECOMPUTE_INTERVAL_SECS` | `recompute_interval_secs` |
//! | `BILLIARD_REMOVAL_POLICY` | `removal_policy` |
//! | `BILLIARD_DEFAULT_CLIENT_NAME` | `default_client_name` |

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::model::{Money, TariffUnit};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

fn invalid(key: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        message: message.into(),
    }
}

/// What to do when asked to remove a table that has a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Delete anyway; the session is discarded.
    Allow,
    /// Refuse while the table is occupied.
    #[default]
    RequireIdle,
    /// Publish the final bill, then delete.
    ForceClose,
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalPolicy::Allow => write!(f, "allow"),
            RemovalPolicy::RequireIdle => write!(f, "require_idle"),
            RemovalPolicy::ForceClose => write!(f, "force_close"),
        }
    }
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(RemovalPolicy::Allow),
            "require_idle" | "idle" => Ok(RemovalPolicy::RequireIdle),
            "force_close" | "force" => Ok(RemovalPolicy::ForceClose),
            other => Err(format!(
                "Unknown removal policy: '{other}'. Valid options: allow, require_idle, force_close"
            )),
        }
    }
}

fn default_tariff() -> Money {
    Money::from_minor(1000)
}

fn default_interval() -> u64 {
    1
}

fn default_client_name() -> String {
    "Guest".to_string()
}

fn default_event_capacity() -> usize {
    256
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub tariff_unit: TariffUnit,
    /// Tariff given to tables added without one.
    pub tariff_default: Money,
    pub recompute_interval_secs: u64,
    pub removal_policy: RemovalPolicy,
    /// Client name used when a table becomes occupied without one.
    pub default_client_name: String,
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            tariff_unit: TariffUnit::default(),
            tariff_default: default_tariff(),
            recompute_interval_secs: default_interval(),
            removal_policy: RemovalPolicy::default(),
            default_client_name: default_client_name(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl LedgerConfig {
    /// Loads defaults, then `path` if given, then environment overrides, and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml(&contents)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `BILLIARD_*` overrides read through `lookup`.
    ///
    /// Unlike a missing variable, a present but unparsable one is an error.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(unit) = lookup("BILLIARD_TARIFF_UNIT") {
            self.tariff_unit = unit.parse().map_err(|e| invalid("tariff_unit", e))?;
            debug!(tariff_unit = %self.tariff_unit, "Override from environment");
        }
        if let Some(tariff) = lookup("BILLIARD_TARIFF_DEFAULT") {
            self.tariff_default = tariff
                .parse()
                .map_err(|e: crate::model::MoneyParseError| invalid("tariff_default", e.to_string()))?;
            debug!(tariff_default = %self.tariff_default, "Override from environment");
        }
        if let Some(secs) = lookup("BILLIARD_RECOMPUTE_INTERVAL_SECS") {
            self.recompute_interval_secs = secs
                .trim()
                .parse()
                .map_err(|_| invalid("recompute_interval_secs", format!("'{secs}' is not a whole number")))?;
            debug!(secs = self.recompute_interval_secs, "Override from environment");
        }
        if let Some(policy) = lookup("BILLIARD_REMOVAL_POLICY") {
            self.removal_policy = policy.parse().map_err(|e| invalid("removal_policy", e))?;
            debug!(removal_policy = %self.removal_policy, "Override from environment");
        }
        if let Some(name) = lookup("BILLIARD_DEFAULT_CLIENT_NAME") {
            self.default_client_name = name;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recompute_interval_secs == 0 {
            return Err(invalid("recompute_interval_secs", "must be greater than zero"));
        }
        if self.tariff_default.is_negative() {
            return Err(invalid("tariff_default", "must not be negative"));
        }
        if self.default_client_name.trim().is_empty() {
            return Err(invalid("default_client_name", "must not be empty"));
        }
        if self.event_capacity == 0 {
            return Err(invalid("event_capacity", "must be greater than zero"));
        }
        Ok(())
    }

    pub fn recompute_interval(&self) -> Duration {
        Duration::from_secs(self.recompute_interval_secs)
    }
}
