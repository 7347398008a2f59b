//! # Infra Config
//!
//! Loads the register configuration from a TOML file (by default
//! `riskreg.toml`), applies `RISKREG_*` environment overrides and validates
//! the result.
//!
//! ```toml
//! log_level = "info"
//!
//! [analytics]
//! timeline_length = 10
//! high_risk_levels = ["HIGH", "VERY HIGH", "PROCEED AT YOUR OWN RISK"]
//!
//! [analytics.trend]
//! window_days = 30
//! increasing_ratio = 0.3
//! decreasing_ratio = 0.1
//!
//! [export]
//! date_format = "%-m/%-d/%Y"
//! ```
//!
//! Every key is optional; omitted keys take their defaults.

#![deny(missing_docs)]

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use risk_analytics::AnalyticsPolicy;
use risk_core::scoring::MAX_RATING;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "riskreg.toml";

/// Overrides `log_level`.
pub const ENV_LOG_LEVEL: &str = "RISKREG_LOG_LEVEL";
/// Overrides `export.date_format`.
pub const ENV_DATE_FORMAT: &str = "RISKREG_DATE_FORMAT";
/// Overrides `analytics.trend.window_days`.
pub const ENV_TREND_WINDOW_DAYS: &str = "RISKREG_TREND_WINDOW_DAYS";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MAX_WINDOW_DAYS: i64 = 3650;

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path}: {message}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error text
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation errors
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Spreadsheet export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `strftime` pattern for date cells
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

/// Register configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Default tracing directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Aggregation thresholds
    #[serde(default)]
    pub analytics: AnalyticsPolicy,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            analytics: AnalyticsPolicy::default(),
            export: ExportConfig::default(),
        }
    }
}

impl RegisterConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `RISKREG_*` names
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }

        if let Some(date_format) = lookup(ENV_DATE_FORMAT) {
            self.export.date_format = date_format;
        }

        if let Some(window) = lookup(ENV_TREND_WINDOW_DAYS) {
            if let Ok(days) = window.trim().parse() {
                self.analytics.trend.window_days = days;
            }
        }

        self
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let date_format = &self.export.date_format;
        if date_format.trim().is_empty() {
            errors.push("export.date_format cannot be empty".to_string());
        } else if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            errors.push(format!("Invalid export.date_format '{}'", date_format));
        }

        let analytics = &self.analytics;
        if analytics.high_risk_levels.is_empty() {
            errors.push("analytics.high_risk_levels cannot be empty".to_string());
        }
        if analytics.timeline_length == 0 {
            errors.push("analytics.timeline_length must be greater than 0".to_string());
        }

        let trend = &analytics.trend;
        if !(1..=MAX_WINDOW_DAYS).contains(&trend.window_days) {
            errors.push(format!(
                "analytics.trend.window_days {} must be between 1 and {}",
                trend.window_days, MAX_WINDOW_DAYS
            ));
        }
        for (name, ratio) in [
            ("increasing_ratio", trend.increasing_ratio),
            ("decreasing_ratio", trend.decreasing_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                errors.push(format!("analytics.trend.{} must be between 0 and 1", name));
            }
        }
        if trend.decreasing_ratio > trend.increasing_ratio {
            errors.push(
                "analytics.trend.decreasing_ratio cannot exceed increasing_ratio".to_string(),
            );
        }

        let profitability = &analytics.profitability;
        let max_score = f64::from(MAX_RATING) * f64::from(MAX_RATING);
        for (name, score) in [
            ("average_score_for_high", profitability.average_score_for_high),
            ("average_score_for_medium", profitability.average_score_for_medium),
        ] {
            if !(0.0..=max_score).contains(&score) {
                errors.push(format!(
                    "analytics.profitability.{} must be between 0 and {}",
                    name, max_score
                ));
            }
        }
        if profitability.high_risk_count_for_medium > profitability.high_risk_count_for_high
            || profitability.average_score_for_medium > profitability.average_score_for_high
        {
            errors.push(
                "analytics.profitability medium thresholds cannot exceed high thresholds"
                    .to_string(),
            );
        }

        let financial = &analytics.financial;
        for (name, value) in [
            ("legacy_base_value", financial.legacy_base_value),
            ("legacy_probability_factor", financial.legacy_probability_factor),
            ("legacy_scale", financial.legacy_scale),
            ("medium_impact_threshold", financial.medium_impact_threshold),
            ("high_impact_threshold", financial.high_impact_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("analytics.financial.{} must be non-negative", name));
            }
        }
        if financial.medium_impact_threshold > financial.high_impact_threshold {
            errors.push(
                "analytics.financial.medium_impact_threshold cannot exceed high_impact_threshold"
                    .to_string(),
            );
        }
        if !(0.0..=1.0).contains(&financial.default_mitigation_effectiveness) {
            errors.push(
                "analytics.financial.default_mitigation_effectiveness must be between 0 and 1"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from `path` (defaults if missing), apply env overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}
