//! CLI configuration loaded from environment variables.

use anyhow::{Context, Result};
use pricefall_core::constants::DEFAULT_PRICE_UNIT;
use pricefall_form::Locale;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Message catalog for rendered output.
    pub locale: Locale,
    /// Unit label appended to prices.
    pub unit: String,
    /// Log level filter string (e.g. "warn", "pricefall_form=debug").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            unit: DEFAULT_PRICE_UNIT.to_string(),
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `PRICEFALL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let locale = match lookup("PRICEFALL_LOCALE") {
            Some(raw) => raw
                .parse()
                .context("PRICEFALL_LOCALE must be \"ja\" or \"en\"")?,
            None => defaults.locale,
        };

        let unit = lookup("PRICEFALL_UNIT").unwrap_or(defaults.unit);
        let log_level = lookup("PRICEFALL_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = lookup("PRICEFALL_LOG_FORMAT").unwrap_or(defaults.log_format);
        anyhow::ensure!(
            log_format == "text" || log_format == "json",
            "PRICEFALL_LOG_FORMAT must be \"text\" or \"json\", got {log_format:?}"
        );

        Ok(Config {
            locale,
            unit,
            log_level,
            log_format,
        })
    }
}
