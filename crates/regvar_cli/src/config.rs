//! Configuration management.
//!
//! Settings come from a TOML file, `REGVAR_*` environment variables and
//! command line flags. Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use regvar_core::quantile::MIN_SAMPLE_SIZE;
use regvar_risk::validation::{DEFAULT_TOLERANCE, DEFAULT_TRIALS};
use regvar_risk::var::{ConversionLength, VarConfig};
use serde::Deserialize;
use thiserror::Error;

/// File read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "regvar.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Value outside its accepted range.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Config file missing or unparseable.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable that does not parse.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Per-computation details
    Debug,
    /// Progress
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegvarConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Regulatory quantile for VaR
    pub quantile: f64,
    /// VaR holding period in days
    pub horizon_days: u32,
    /// Shortest sample accepted by the quantile conversion
    pub min_sample_size: usize,
    /// Nominal sample length for the conversion; the observed length when unset
    pub conversion_length: Option<usize>,
    /// Trials per validation run
    pub trials: usize,
    /// Base seed for simulation and validation
    pub seed: u64,
    /// Agreement tolerance for validation
    pub tolerance: f64,
}

impl Default for RegvarConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            quantile: 0.01,
            horizon_days: 1,
            min_sample_size: MIN_SAMPLE_SIZE,
            conversion_length: None,
            trials: DEFAULT_TRIALS,
            seed: 0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} does not parse", key, value)))
}

impl RegvarConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: RegvarConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `REGVAR_*` variables found through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("REGVAR_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(v.trim())?;
        }
        if let Some(v) = lookup("REGVAR_QUANTILE") {
            self.quantile = parse_env("REGVAR_QUANTILE", &v)?;
        }
        if let Some(v) = lookup("REGVAR_HORIZON_DAYS") {
            self.horizon_days = parse_env("REGVAR_HORIZON_DAYS", &v)?;
        }
        if let Some(v) = lookup("REGVAR_MIN_SAMPLE_SIZE") {
            self.min_sample_size = parse_env("REGVAR_MIN_SAMPLE_SIZE", &v)?;
        }
        if let Some(v) = lookup("REGVAR_CONVERSION_LENGTH") {
            self.conversion_length = Some(parse_env("REGVAR_CONVERSION_LENGTH", &v)?);
        }
        if let Some(v) = lookup("REGVAR_TRIALS") {
            self.trials = parse_env("REGVAR_TRIALS", &v)?;
        }
        if let Some(v) = lookup("REGVAR_SEED") {
            self.seed = parse_env("REGVAR_SEED", &v)?;
        }
        if let Some(v) = lookup("REGVAR_TOLERANCE") {
            self.tolerance = parse_env("REGVAR_TOLERANCE", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "quantile",
                message: format!("{} is outside (0, 1)", self.quantile),
            });
        }
        if self.horizon_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "horizon_days",
                message: "must be at least 1".to_string(),
            });
        }
        if self.min_sample_size < 2 {
            return Err(ConfigError::InvalidValue {
                key: "min_sample_size",
                message: format!("{} is below 2", self.min_sample_size),
            });
        }
        if let Some(n) = self.conversion_length {
            if n < 2 {
                return Err(ConfigError::InvalidValue {
                    key: "conversion_length",
                    message: format!("{} is below 2", n),
                });
            }
        }
        if self.trials == 0 {
            return Err(ConfigError::InvalidValue {
                key: "trials",
                message: "must be at least 1".to_string(),
            });
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "tolerance",
                message: format!("{} is not a non-negative number", self.tolerance),
            });
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if cli.verbose && !matches!(self.log_level, LogLevel::Trace) {
            self.log_level = LogLevel::Debug;
        }
        if let Some(q) = cli.quantile {
            self.quantile = q;
        }
        if let Some(h) = cli.horizon_days {
            self.horizon_days = h;
        }
        if let Some(m) = cli.min_sample_size {
            self.min_sample_size = m;
        }
        if let Some(n) = cli.conversion_length {
            self.conversion_length = Some(n);
        }
        if let Some(t) = cli.trials {
            self.trials = t;
        }
        if let Some(s) = cli.seed {
            self.seed = s;
        }
        if let Some(t) = cli.tolerance {
            self.tolerance = t;
        }
        Ok(())
    }

    /// Estimator settings derived from this configuration.
    pub fn var_config(&self) -> VarConfig {
        VarConfig {
            quantile: self.quantile,
            horizon_days: self.horizon_days,
            conversion_length: self
                .conversion_length
                .map_or(ConversionLength::Observed, ConversionLength::Fixed),
            min_sample_size: self.min_sample_size,
        }
    }
}

/// Command line overrides.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Raise the log level to debug
    pub verbose: bool,
    /// Log level override
    pub log_level: Option<String>,
    /// Quantile override
    pub quantile: Option<f64>,
    /// Horizon override
    pub horizon_days: Option<u32>,
    /// Minimum sample size override
    pub min_sample_size: Option<usize>,
    /// Conversion length override
    pub conversion_length: Option<usize>,
    /// Trial count override
    pub trials: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Tolerance override
    pub tolerance: Option<f64>,
}

/// Build configuration from all sources, reading the process environment.
pub fn build_config(cli: &CliArgs) -> Result<RegvarConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// Build configuration with an explicit environment lookup.
///
/// An explicit `--config` file must exist; otherwise [`DEFAULT_CONFIG_FILE`]
/// is read only when present.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<RegvarConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => RegvarConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            RegvarConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => RegvarConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
