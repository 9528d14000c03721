//! HTTP client for the exchange's public REST API.

use async_trait::async_trait;
use candela_types::{CandelaError, Provider};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::url::{exchange_info_url, klines_url};
use crate::{KlineRequest, MarketDataSource};

/// Configuration for the market-data client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST base URL (scheme and host, no path).
    pub base_url: String,
    /// Per-call request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_provider(Provider::default())
    }
}

impl ClientConfig {
    /// Creates the default configuration for a provider.
    #[must_use]
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            base_url: provider.base_url().to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("candela/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors that can occur during a single HTTP call.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Server returned a non-success status.
    #[error("Server returned status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

impl From<FetchError> for CandelaError {
    fn from(e: FetchError) -> Self {
        Self::Transport(e.to_string())
    }
}

/// HTTP client with connection pooling, implementing [`MarketDataSource`].
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    config: ClientConfig,
}

impl MarketDataClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Paginated fetches reuse one connection per host
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs one GET and decodes the body as JSON.
    ///
    /// Only `200 OK` counts as success.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, non-200 status, or a
    /// body that is not valid JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.config.timeout)
        } else {
            FetchError::Http(error)
        }
    }
}

#[async_trait]
impl MarketDataSource for MarketDataClient {
    async fn klines(&self, request: &KlineRequest) -> Result<Value, CandelaError> {
        let url = klines_url(&self.config.base_url, request);
        Ok(self.get_json(&url).await?)
    }

    async fn exchange_info(&self) -> Result<Value, CandelaError> {
        let url = exchange_info_url(&self.config.base_url);
        Ok(self.get_json(&url).await?)
    }
}
