//! Benchmark utilities for candela.

use async_trait::async_trait;
use candela_lib::{KlineRequest, MarketDataSource, Result};
use serde_json::{Value, json};

/// Fixed grid of one-minute candles served from memory.
#[derive(Debug, Clone)]
pub struct SyntheticExchange {
    latest: i64,
    depth: i64,
    step: i64,
}

impl SyntheticExchange {
    /// Creates an exchange holding `depth` one-minute candles ending at `latest`.
    pub const fn new(latest: i64, depth: i64) -> Self {
        Self {
            latest,
            depth,
            step: 60_000,
        }
    }

    /// Builds the raw exchange row opening at `open_time`.
    pub fn row(open_time: i64) -> Value {
        let price = 25_000.0 + (open_time / 60_000 % 1_000) as f64 * 0.5;
        json!([
            open_time,
            price.to_string(),
            (price + 3.0).to_string(),
            (price - 2.0).to_string(),
            (price + 1.0).to_string(),
            "7.125",
            open_time + 59_999,
            "178125.0",
            64,
            "3.5",
            "87500.0",
            "0"
        ])
    }
}

#[async_trait]
impl MarketDataSource for SyntheticExchange {
    async fn klines(&self, request: &KlineRequest) -> Result<Value> {
        let earliest = self.latest - (self.depth - 1) * self.step;
        let end = request.end_time.unwrap_or(self.latest).min(self.latest);
        if end < earliest {
            return Ok(json!([]));
        }

        let last = end - (end - earliest) % self.step;
        let count = ((last - earliest) / self.step + 1).min(request.limit as i64);
        Ok(Value::Array(
            (0..count)
                .map(|k| Self::row(last - (count - 1 - k) * self.step))
                .collect(),
        ))
    }

    async fn exchange_info(&self) -> Result<Value> {
        Ok(json!({ "symbols": [{ "symbol": "BTCUSDT", "status": "TRADING" }] }))
    }
}
