use serde::{Deserialize, Serialize};
use std::env;

use crate::utils::error::{AnalyticsError, AnalyticsResult};

/// Default GA4 Data API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://analyticsdata.googleapis.com";

/// Environment variable holding the GA4 property id
pub const PROPERTY_ID_ENV: &str = "GA_PROPERTY_ID";

/// Environment variable holding the OAuth access token
pub const ACCESS_TOKEN_ENV: &str = "GA_ACCESS_TOKEN";

/// Configuration for the analytics client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub property_id: Option<String>,
    pub access_token: Option<String>,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Create a new configuration with default endpoint and timeout
    pub fn new() -> Self {
        Self {
            property_id: None,
            access_token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 30,
        }
    }

    /// Read property id and access token from the environment
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.property_id = env::var(PROPERTY_ID_ENV).ok().filter(|v| !v.is_empty());
        config.access_token = env::var(ACCESS_TOKEN_ENV).ok().filter(|v| !v.is_empty());
        config
    }

    /// Set the GA4 property id
    pub fn with_property_id(mut self, property_id: &str) -> Self {
        self.property_id = Some(property_id.to_string());
        self
    }

    /// Set the OAuth access token
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Check that everything needed to construct a client is present
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.property_id.as_deref().unwrap_or("").is_empty() {
            return Err(AnalyticsError::Configuration(format!(
                "GA4 property id is not set (use --property or {})",
                PROPERTY_ID_ENV
            )));
        }
        if self.access_token.as_deref().unwrap_or("").is_empty() {
            return Err(AnalyticsError::Configuration(format!(
                "access token is not set (set {})",
                ACCESS_TOKEN_ENV
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
