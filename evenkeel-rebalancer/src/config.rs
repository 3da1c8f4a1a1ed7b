//! Rebalancer configuration
//!
//! Configuration loaded from environment variables, with command-line
//! overrides applied by the binary.

use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Rebalancer configuration
#[derive(Debug, Clone)]
pub struct RebalancerConfig {
    /// Base URL of the orchestration API
    pub endpoint: String,

    /// Optional bearer token for the orchestration API
    pub auth_token: Option<String>,

    /// Timeout for a single API request in seconds
    pub request_timeout_secs: u64,

    /// Detect imbalance but log instead of forcing deployments
    pub dry_run: bool,
}

impl Default for RebalancerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            auth_token: None,
            request_timeout_secs: 30,
            dry_run: false,
        }
    }
}

impl RebalancerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let endpoint = std::env::var("EVENKEEL_ENDPOINT")
            .ok()
            .unwrap_or(defaults.endpoint);

        let auth_token = std::env::var("EVENKEEL_API_TOKEN").ok();

        let request_timeout_secs = match std::env::var("EVENKEEL_REQUEST_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidValue("EVENKEEL_REQUEST_TIMEOUT".to_string(), raw.clone())
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        let dry_run = std::env::var("EVENKEEL_DRY_RUN")
            .ok()
            .map(|v| v == "true" || v == "1")
            .unwrap_or(defaults.dry_run);

        Ok(Self {
            endpoint,
            auth_token,
            request_timeout_secs,
            dry_run,
        })
    }

    /// Check the configuration after all overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "endpoint".to_string(),
                self.endpoint.clone(),
            ));
        }
        Ok(())
    }

    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
