//! Gateway configuration
//!
//! Structures loaded from YAML that configure registration defaults, the
//! HTTP transport and the response decoder.

use crate::decode::DecoderConfig;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::registration::RegistrationOptions;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete gateway configuration
///
/// ```yaml
/// defaults:
///   mode: simulator
///   vendor: rubaidh
///   notification_url: http://test.host/notification
///   currency: GBP
/// http:
///   timeout_seconds: 20
/// decoder:
///   retain_unknown_fields: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Registration defaults applied beneath every caller's options
    #[serde(default)]
    pub defaults: RegistrationOptions,

    /// Post registrations here instead of the mode's gateway URL
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// HTTP transport configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Response decoder switches
    #[serde(default)]
    pub decoder: DecoderConfig,
}

impl GatewayConfig {
    /// Check values that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint_url {
            Url::parse(endpoint)
                .map_err(|e| Error::invalid_config("endpoint_url", e.to_string()))?;
        }
        if let Some(url) = &self.defaults.notification_url {
            Url::parse(url)
                .map_err(|e| Error::invalid_config("defaults.notification_url", e.to_string()))?;
        }
        self.http.validate()
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries after a failure to connect
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

impl HttpConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.retry_backoff.initial_ms > self.retry_backoff.max_ms {
            return Err(Error::invalid_config(
                "http.retry_backoff",
                "initial_ms exceeds max_ms",
            ));
        }
        Ok(())
    }

    /// Runtime client configuration
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.retry_backoff.backoff_type,
                Duration::from_millis(self.retry_backoff.initial_ms),
                Duration::from_millis(self.retry_backoff.max_ms),
            );
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

/// Backoff configuration for retries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Backoff type
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_ms: default_initial_backoff(),
            max_ms: default_max_backoff(),
        }
    }
}

fn default_initial_backoff() -> u64 {
    250
}

fn default_max_backoff() -> u64 {
    5000
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a gateway configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load and validate a gateway configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<GatewayConfig> {
    let config: GatewayConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse gateway YAML: {e}")))?;

    config.validate()?;
    Ok(config)
}
