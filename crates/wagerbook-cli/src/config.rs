//! CLI configuration
//!
//! Layered from `.env`, an optional `--config` file, `config/default`,
//! `config/local`, then `WAGERBOOK__*` environment variables.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wagerbook_ledger::LedgerConfig;
use wagerbook_types::{Amount, Result, WagerbookError};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WagerbookConfig {
    /// Ledger defaults
    #[serde(default)]
    pub ledger: LedgerSettings,

    /// Expiry sweeper cadence
    #[serde(default)]
    pub sweeper: SweeperSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Opening primary balance in major units
    #[serde(default = "default_opening_balance")]
    pub opening_balance: Decimal,

    /// Bonus lifetime when a grant does not name one
    #[serde(default = "default_expiry_hours")]
    pub default_expiry_hours: u32,

    /// Wager multiplier when a grant does not name one
    #[serde(default = "default_wager_multiplier")]
    pub default_wager_multiplier: Decimal,

    /// Countdowns under this many minutes are flagged urgent
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_minutes: u32,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            opening_balance: default_opening_balance(),
            default_expiry_hours: default_expiry_hours(),
            default_wager_multiplier: default_wager_multiplier(),
            urgent_threshold_minutes: default_urgent_threshold(),
        }
    }
}

impl LedgerSettings {
    pub fn opening_balance(&self) -> Amount {
        Amount::from_decimal(self.opening_balance)
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            default_expiry_hours: self.default_expiry_hours,
            default_wager_multiplier: self.default_wager_multiplier,
            urgent_threshold: chrono::Duration::minutes(i64::from(self.urgent_threshold_minutes)),
        }
    }
}

/// Expiry sweeper settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperSettings {
    /// Sweep period in milliseconds
    #[serde(default = "default_sweep_interval")]
    pub interval_ms: u64,
}

impl Default for SweeperSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_sweep_interval(),
        }
    }
}

impl SweeperSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_opening_balance() -> Decimal {
    Decimal::from(5000)
}

fn default_expiry_hours() -> u32 {
    72
}

fn default_wager_multiplier() -> Decimal {
    Decimal::ONE
}

fn default_urgent_threshold() -> u32 {
    60
}

fn default_sweep_interval() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl WagerbookConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // WAGERBOOK__LEDGER__OPENING_BALANCE=1000 and friends
        builder = builder.add_source(
            config::Environment::with_prefix("WAGERBOOK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Reject settings the ledger cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sweeper.interval_ms == 0 {
            return Err(config_error("sweeper.interval_ms must be positive"));
        }
        if self.ledger.default_expiry_hours == 0 {
            return Err(config_error("ledger.default_expiry_hours must be positive"));
        }
        if self.ledger.default_wager_multiplier < Decimal::ZERO {
            return Err(config_error("ledger.default_wager_multiplier must not be negative"));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(config_error(&format!(
                "logging.format must be pretty or json, got {}",
                other
            ))),
        }
    }
}

fn config_error(message: &str) -> WagerbookError {
    WagerbookError::Config {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn from_toml(toml: &str) -> WagerbookConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = WagerbookConfig::default();
        assert_eq!(config.ledger.opening_balance(), Amount::major(5000));
        assert_eq!(config.ledger.default_expiry_hours, 72);
        assert_eq!(config.sweeper.interval(), Duration::from_secs(1));
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());

        let ledger = config.ledger.ledger_config();
        assert_eq!(ledger, LedgerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [ledger]
            opening_balance = "1250.50"
            default_wager_multiplier = "2.5"

            [logging]
            format = "json"
            "#,
        );
        assert_eq!(config.ledger.opening_balance(), Amount::from_minor(125_050));
        assert_eq!(config.ledger.default_wager_multiplier, dec!(2.5));
        assert_eq!(config.ledger.urgent_threshold_minutes, 60);
        assert_eq!(config.sweeper.interval_ms, 1000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = WagerbookConfig::default();
        config.sweeper.interval_ms = 0;
        assert!(matches!(config.validate(), Err(WagerbookError::Config { .. })));

        let mut config = WagerbookConfig::default();
        config.ledger.default_expiry_hours = 0;
        assert!(config.validate().is_err());

        let mut config = WagerbookConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
