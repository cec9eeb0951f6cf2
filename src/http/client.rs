//! Form-posting HTTP client for the gateway
//!
//! Registrations go out as `application/x-www-form-urlencoded` bodies and
//! the reply text is handed back untouched for the decoder.

use crate::error::{Error, Result};
use crate::gateway::Transport;
use crate::types::BackoffType;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Settings for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Reconnect attempts after the first connection failure
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_type: BackoffType,
    /// Extra headers sent with every post
    pub default_headers: HashMap<String, String>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
            backoff_type: BackoffType::Exponential,
            default_headers: HashMap::new(),
            user_agent: format!("sagepay-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`]
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Strategy and bounds for the delay between reconnect attempts
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Gateway transport over reqwest
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST a url-encoded form and return the body text as received
    ///
    /// A registration the gateway has seen must not be sent twice, so only
    /// connection failures are retried. Timeouts and error statuses are
    /// returned at once.
    pub async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            let err = match self.request(url, form).send().await {
                Ok(response) => return read_body(url, response).await,
                Err(e) => e,
            };

            if err.is_timeout() {
                return Err(Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                });
            }
            if !err.is_connect() {
                return Err(Error::Http(err));
            }
            if attempt >= max_retries {
                if max_retries == 0 {
                    return Err(Error::Http(err));
                }
                warn!(url, max_retries, error = %err, "Gateway unreachable, giving up");
                return Err(Error::MaxRetriesExceeded { max_retries });
            }

            let delay = self.calculate_backoff(attempt);
            attempt += 1;
            warn!(
                url,
                attempt,
                max_retries,
                ?delay,
                error = %err,
                "Could not connect to gateway, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn request(&self, url: &str, form: &[(String, String)]) -> RequestBuilder {
        self.config
            .default_headers
            .iter()
            .fold(self.client.post(url), |req, (key, value)| {
                req.header(key.as_str(), value.as_str())
            })
            .form(form)
    }

    /// Delay before reconnect attempt `attempt` (zero-based)
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        self.config.backoff_type.delay(
            self.config.initial_backoff,
            self.config.max_backoff,
            attempt,
        )
    }
}

async fn read_body(url: &str, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::http_status(status.as_u16(), body));
    }
    if status != StatusCode::OK {
        debug!(url, status = status.as_u16(), "Non-200 success status from gateway");
    }

    let body = response.text().await?;
    debug!(url, bytes = body.len(), "Gateway replied");
    Ok(body)
}

#[async_trait]
impl Transport for HttpClient {
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        HttpClient::post_form(self, url, form).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
