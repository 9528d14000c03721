//! The upstream market-data seam.

use async_trait::async_trait;
use candela_types::{CandelaError, Timeframe};
use serde_json::Value;

/// Parameters of one upstream kline call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRequest {
    /// Trading pair symbol (e.g. `BTCUSDT`).
    pub symbol: String,
    /// Candle interval.
    pub timeframe: Timeframe,
    /// Number of rows requested, at most the provider cap.
    pub limit: usize,
    /// Inclusive upper bound on open time in milliseconds; `None` means latest.
    pub end_time: Option<i64>,
}

impl KlineRequest {
    /// Creates a request for the most recent `limit` candles.
    #[must_use]
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, limit: usize) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            limit,
            end_time: None,
        }
    }

    /// Sets the end-time cursor.
    #[must_use]
    pub fn with_end_time(mut self, end_time: Option<i64>) -> Self {
        self.end_time = end_time;
        self
    }
}

/// A source of raw market data.
///
/// Implementations return the decoded JSON body of a successful call and map
/// non-success statuses, timeouts, and undecodable bodies to
/// [`CandelaError::Transport`]. Interpreting the body is left to the caller.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Issues one kline query.
    async fn klines(&self, request: &KlineRequest) -> Result<Value, CandelaError>;

    /// Fetches the exchange information document.
    async fn exchange_info(&self) -> Result<Value, CandelaError>;
}
