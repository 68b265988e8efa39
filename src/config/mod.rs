#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::EndpointProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_placeholders, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org/?format=json";
pub const DEFAULT_GEO_ENDPOINT: &str = "https://freegeoip.app/json/{ip}";
pub const DEFAULT_PASS_ENDPOINT: &str =
    "http://api.open-notify.org/iss-pass.json?lat={lat}&lon={lon}";

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Fully resolved endpoint settings: defaults, then the config file, then flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub ip_endpoint: String,
    pub geo_endpoint: String,
    pub pass_endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ip_endpoint: DEFAULT_IP_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            pass_endpoint: DEFAULT_PASS_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl EndpointProvider for EndpointConfig {
    fn ip_endpoint(&self) -> &str {
        &self.ip_endpoint
    }

    fn geo_endpoint(&self) -> &str {
        &self.geo_endpoint
    }

    fn pass_endpoint(&self) -> &str {
        &self.pass_endpoint
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<()> {
        validate_url("ip_endpoint", &self.ip_endpoint)?;
        validate_url("geo_endpoint", &self.geo_endpoint)?;
        validate_placeholders("geo_endpoint", &self.geo_endpoint, &["{ip}"])?;
        validate_url("pass_endpoint", &self.pass_endpoint)?;
        validate_placeholders("pass_endpoint", &self.pass_endpoint, &["{lat}", "{lon}"])?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EndpointConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_geo_template_requires_ip_placeholder() {
        let config = EndpointConfig {
            geo_endpoint: "https://freegeoip.app/json/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = EndpointConfig {
            timeout_seconds: Some(10),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));

        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }
}
