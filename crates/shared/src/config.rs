//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Currency selection and display configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Currency selection and display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Fallback currency code when no candidate source resolves.
    #[serde(default = "default_code")]
    pub default_code: String,
    /// Whether to insert a space between the symbol and the amount.
    #[serde(default)]
    pub use_space: bool,
    /// Name of the cookie holding the persisted currency selection.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Lifetime of the selection cookie, in days.
    #[serde(default = "default_cookie_days")]
    pub cookie_days: u64,
}

fn default_code() -> String {
    "USD".to_string()
}

fn default_cookie_name() -> String {
    "currency".to_string()
}

fn default_cookie_days() -> u64 {
    30
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_code: default_code(),
            use_space: false,
            cookie_name: default_cookie_name(),
            cookie_days: default_cookie_days(),
        }
    }
}

impl CurrencyConfig {
    /// Lifetime of the selection cookie as a `Duration`.
    #[must_use]
    pub const fn cookie_ttl(&self) -> Duration {
        Duration::from_secs(self.cookie_days * 24 * 60 * 60)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VALUTA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_config_defaults() {
        let config = CurrencyConfig::default();
        assert_eq!(config.default_code, "USD");
        assert!(!config.use_space);
        assert_eq!(config.cookie_name, "currency");
        assert_eq!(config.cookie_days, 30);
    }

    #[test]
    fn test_cookie_ttl() {
        let config = CurrencyConfig {
            cookie_days: 30,
            ..CurrencyConfig::default()
        };
        assert_eq!(config.cookie_ttl(), Duration::from_secs(30 * 24 * 60 * 60));

        let config = CurrencyConfig {
            cookie_days: 1,
            ..CurrencyConfig::default()
        };
        assert_eq!(config.cookie_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_load_uses_defaults_without_sources() {
        temp_env::with_vars_unset(["VALUTA__CURRENCY__DEFAULT_CODE", "RUN_MODE"], || {
            let config = AppConfig::load().expect("load should succeed with no sources");
            assert_eq!(config.currency.default_code, "USD");
        });
    }

    #[test]
    fn test_env_overrides_default_code() {
        temp_env::with_var("VALUTA__CURRENCY__DEFAULT_CODE", Some("EUR"), || {
            let config = AppConfig::load().expect("load should succeed");
            assert_eq!(config.currency.default_code, "EUR");
        });
    }
}
