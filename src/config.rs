// Startup settings, read from the environment.
// There is no config file: everything has a default and the variables
// below only override it.

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Filter used when neither `CLINIC_LOG` nor `RUST_LOG` is set. Warnings
/// only, so the menu on stdout is not interleaved with log noise.
pub const DEFAULT_LOG_FILTER: &str = "clinic_cli=warn";

const PROGRESS_DATE_VAR: &str = "CLINIC_PROGRESS_DATE";
const LOG_VAR: &str = "CLINIC_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed `YYYY-MM-DD` date stamped on new progress entries. `None`
    /// means use today's date.
    pub progress_date: Option<String>,
    /// tracing-subscriber filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            progress_date: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read `CLINIC_PROGRESS_DATE` and `CLINIC_LOG` from the process
    /// environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an arbitrary variable source, so tests
    /// don't have to mutate the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(PROGRESS_DATE_VAR).filter(|v| !v.trim().is_empty()) {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| {
                    format!("{PROGRESS_DATE_VAR} must be a YYYY-MM-DD date, got '{raw}'")
                })?;
            config.progress_date = Some(date.format("%Y-%m-%d").to_string());
        }

        if let Some(filter) = lookup(LOG_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn pinned_progress_date_is_read() {
        let lookup = lookup_from(&[("CLINIC_PROGRESS_DATE", "2024-09-25")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config.progress_date.as_deref(), Some("2024-09-25"));
    }

    #[test]
    fn malformed_progress_date_is_an_error() {
        let lookup = lookup_from(&[("CLINIC_PROGRESS_DATE", "25/09/2024")]);
        let err = Config::from_lookup(lookup).unwrap_err();
        assert!(err.to_string().contains("CLINIC_PROGRESS_DATE"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let lookup = lookup_from(&[("CLINIC_PROGRESS_DATE", " "), ("CLINIC_LOG", "")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn log_filter_override() {
        let lookup = lookup_from(&[("CLINIC_LOG", "clinic_cli=debug")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config.log_filter, "clinic_cli=debug");
    }
}
