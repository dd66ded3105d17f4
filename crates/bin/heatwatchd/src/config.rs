//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `heatwatch.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Safe temperature range.
    pub thresholds: ThresholdsConfig,
    /// Dispatch behaviour.
    pub dispatch: DispatchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Demo feed settings.
    pub feed: FeedConfig,
}

/// Safe temperature range in °C.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Values strictly below this alert.
    pub lower_limit: f64,
    /// Values strictly above this alert.
    pub upper_limit: f64,
}

/// Notification dispatch settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Bound on one dispatch attempt (token lookup + send), in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Demo feed configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable the deterministic demo temperature feed.
    pub enabled: bool,
    /// Device id the feed reports for.
    pub device_id: String,
    /// Push token registered for the demo device, if any.
    pub push_token: Option<String>,
    /// Seconds between demo observations.
    pub period_secs: u64,
}

impl Config {
    /// Load configuration from `heatwatch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("heatwatch.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HEATWATCH_LOWER_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.thresholds.lower_limit = limit;
            }
        }
        if let Ok(val) = std::env::var("HEATWATCH_UPPER_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.thresholds.upper_limit = limit;
            }
        }
        if let Ok(val) = std::env::var("HEATWATCH_DISPATCH_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.dispatch.timeout_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("HEATWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.lower_limit >= self.thresholds.upper_limit {
            return Err(ConfigError::Validation(format!(
                "lower limit {} must be below upper limit {}",
                self.thresholds.lower_limit, self.thresholds.upper_limit
            )));
        }
        if self.dispatch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "dispatch timeout must be non-zero".to_string(),
            ));
        }
        if self.feed.enabled && self.feed.period_secs == 0 {
            return Err(ConfigError::Validation(
                "feed period must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl DispatchConfig {
    /// The dispatch timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FeedConfig {
    /// The feed period as a [`Duration`].
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            lower_limit: 15.0,
            upper_limit: 30.0,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "heatwatchd=info,heatwatch=info".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            device_id: "demo-thermostat".to_string(),
            push_token: Some("demo-recipient".to_string()),
            period_secs: 5,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
