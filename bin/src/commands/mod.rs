//! CLI command implementations.

use anyhow::{Context, Result};
use candela_lib::prelude::*;
use std::time::Duration;

pub(crate) mod ohlcv;
pub(crate) mod scan;
pub(crate) mod symbols;
pub(crate) mod timeframes;

/// Connection settings shared by every network command.
pub(crate) struct Connection {
    base_url: Option<String>,
    timeout: Duration,
}

impl Connection {
    pub(crate) fn new(base_url: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }

    /// Resolves the provider name and builds its client.
    pub(crate) fn client(&self, provider: &str) -> Result<(Provider, MarketDataClient)> {
        let provider: Provider = provider.parse().map_err(|e| anyhow::anyhow!("{e}"))?;

        let mut config = ClientConfig::for_provider(provider).with_timeout(self.timeout);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }

        let client = MarketDataClient::new(config).context("Failed to create HTTP client")?;
        Ok((provider, client))
    }
}

/// Parses a timeframe argument.
pub(crate) fn parse_timeframe(s: &str) -> Result<Timeframe> {
    s.parse::<Timeframe>().map_err(|e| anyhow::anyhow!("{e}"))
}
