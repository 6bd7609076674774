//! API configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/{TODO_ENV}.toml` (optional, `TODO_ENV` defaults to `development`)
//! 4. Environment variables prefixed with `TODO_`, e.g. `TODO_PORT=3000`

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shape of the `GET /todos` response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// Object keyed by todo id
    #[default]
    Map,

    /// Array of todos carrying their id
    List,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// Version reported by the documentation endpoint
    pub api_version: String,

    /// Response shape of the todo listing
    pub list_format: ListFormat,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Serve the OpenAPI document
    pub enable_docs: bool,

    /// Log level
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            api_version: "0.1".to_string(),
            list_format: ListFormat::Map,
            cors_allowed_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024, // 1 MiB
            request_timeout_seconds: 30,
            enable_docs: true,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self> {
        let env = std::env::var("TODO_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .context("Failed to build default configuration")?,
            )
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Example: TODO_LIST_FORMAT=list
            .add_source(
                config::Environment::with_prefix("TODO")
                    .prefix_separator("_")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let api_config: ApiConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        api_config.validate()?;

        Ok(api_config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("port must be non-zero");
        }
        if self.request_timeout_seconds == 0 {
            bail!("request_timeout_seconds must be non-zero");
        }
        if self.max_body_size == 0 {
            bail!("max_body_size must be non-zero");
        }
        if self.api_version.trim().is_empty() {
            bail!("api_version must not be empty");
        }
        Ok(())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server_address(), "127.0.0.1:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.list_format, ListFormat::Map);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = ApiConfig {
            port: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            request_timeout_seconds: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            api_version: "  ".into(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_list_format_deserializes_lowercase() {
        let format: ListFormat = serde_json::from_str("\"list\"").unwrap();
        assert_eq!(format, ListFormat::List);
    }
}
