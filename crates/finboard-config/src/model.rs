use std::path::PathBuf;

use finboard_core::{EngineOptions, DEFAULT_AMOUNT_TOLERANCE};
use finboard_domain::Bucketing;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stores user-configurable CLI preferences. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub currency_precision: u8,
    pub ui_color_enabled: bool,
    pub default_page_size: i64,
    pub default_bucketing: Bucketing,
    pub amount_tolerance: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Dataset used when `--data` is omitted.
    pub last_dataset: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            currency_precision: Self::DEFAULT_CURRENCY_PRECISION,
            ui_color_enabled: true,
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            default_bucketing: Bucketing::Day,
            amount_tolerance: DEFAULT_AMOUNT_TOLERANCE,
            last_dataset: None,
        }
    }
}

impl Config {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;
    pub const DEFAULT_CURRENCY_PRECISION: u8 = 2;

    /// Engine tunables derived from the stored preferences.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions::default()
            .with_bucketing(self.default_bucketing)
            .with_tolerance(self.amount_tolerance)
    }

    pub fn set_default_page_size(&mut self, size: i64) -> Result<(), ConfigError> {
        if size <= 0 {
            return Err(ConfigError::Invalid {
                key: "default_page_size",
                reason: format!("must be positive (got {size})"),
            });
        }
        self.default_page_size = size;
        Ok(())
    }

    pub fn set_amount_tolerance(&mut self, tolerance: f64) -> Result<(), ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                key: "amount_tolerance",
                reason: format!("must be a finite, non-negative number (got {tolerance})"),
            });
        }
        self.amount_tolerance = tolerance;
        Ok(())
    }

    /// Formats an amount with the configured currency code and precision.
    pub fn format_amount(&self, amount: f64) -> String {
        format!(
            "{:.*} {}",
            self.currency_precision as usize, amount, self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"currency":"EUR","default_bucketing":"month"}"#).unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.default_bucketing, Bucketing::Month);
        assert_eq!(config.default_page_size, Config::DEFAULT_PAGE_SIZE);
        assert!(config.ui_color_enabled);
    }

    #[test]
    fn engine_options_follow_preferences() {
        let config = Config {
            default_bucketing: Bucketing::Week,
            amount_tolerance: 0.5,
            ..Config::default()
        };
        let options = config.engine_options();
        assert_eq!(options.bucketing, Bucketing::Week);
        assert_eq!(options.tolerance, 0.5);
    }

    #[test]
    fn rejects_non_positive_page_size() {
        let mut config = Config::default();
        assert!(config.set_default_page_size(0).is_err());
        config.set_default_page_size(50).unwrap();
        assert_eq!(config.default_page_size, 50);
    }

    #[test]
    fn formats_with_precision_and_currency() {
        let config = Config::default();
        assert_eq!(config.format_amount(12.5), "12.50 USD");
    }
}
