//! Configuration model loaded from external sources.

use config::{Config, ConfigError};
use serde::Deserialize;
use validator::ValidateUrl;

use crate::DEFAULT_PAGE_SIZE;

fn default_debounce_ms() -> u64 {
    crate::SEARCH_DEBOUNCE.as_millis() as u64
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across the dashboard.
pub struct DashboardConfig {
    /// Base URL of the orders backend, e.g. `https://api.example.com/v1`.
    pub api_base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl DashboardConfig {
    /// Loads configuration from `config/default.yaml`, an optional
    /// environment-specific overlay, and `DASHBOARD_`-prefixed environment
    /// variables, then validates it.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("DASHBOARD"))
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base_url.as_str().validate_url() {
            return Err(ConfigError::Message(format!(
                "api_base_url is not a valid URL: {}",
                self.api_base_url
            )));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Message(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DashboardConfig {
        DashboardConfig {
            api_base_url: "https://api.example.com".to_string(),
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
        assert_eq!(base().debounce_ms, 800);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = DashboardConfig {
            api_base_url: "not a url".to_string(),
            ..base()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = DashboardConfig {
            page_size: 0,
            ..base()
        };
        assert!(config.validate().is_err());
    }
}
