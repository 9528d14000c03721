//! In-memory market-data sources for tests.

use async_trait::async_trait;
use candela_types::{CandelaError, Kline};
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{KlineRequest, MarketDataSource};

/// Builds a twelve-field exchange row opening at `open_time`.
pub(crate) fn kline_at(open_time: i64) -> Kline {
    let base = 40_000.0 + (open_time / 1_000 % 97) as f64;
    Kline::new(vec![
        json!(open_time),
        json!(format!("{:.2}", base)),
        json!(format!("{:.2}", base + 2.0)),
        json!(format!("{:.2}", base - 1.0)),
        json!(format!("{:.2}", base + 1.0)),
        json!("1.50000000"),
        json!(open_time + 299_999),
        json!("60001.50"),
        json!(42),
        json!("0.75"),
        json!("30000.75"),
        json!("0"),
    ])
}

/// A symbol's full history, served the way the exchange serves it.
pub(crate) struct HistorySource {
    open_times: Vec<i64>,
    fail_on: Option<usize>,
    ignore_end_time: bool,
    exchange_info: Value,
    requests: Mutex<Vec<KlineRequest>>,
}

impl HistorySource {
    /// `total` candles spaced `step_ms` apart, the last opening at `latest`.
    pub(crate) fn ending_at(total: usize, step_ms: i64, latest: i64) -> Self {
        let open_times = (0..total as i64)
            .map(|k| latest - (total as i64 - 1 - k) * step_ms)
            .collect();
        Self {
            open_times,
            fail_on: None,
            ignore_end_time: false,
            exchange_info: json!({ "symbols": [] }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Like [`Self::ending_at`], with the last candle already open.
    pub(crate) fn ending_now(total: usize, step_ms: i64) -> Self {
        let now = Utc::now().timestamp_millis();
        Self::ending_at(total, step_ms, now - now % step_ms)
    }

    /// Fails the call with the given zero-based index.
    pub(crate) fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Serves the latest window regardless of the cursor.
    pub(crate) fn ignoring_end_time(mut self) -> Self {
        self.ignore_end_time = true;
        self
    }

    pub(crate) fn with_exchange_info(mut self, body: Value) -> Self {
        self.exchange_info = body;
        self
    }

    /// Returns the kline requests received so far.
    pub(crate) fn requests(&self) -> Vec<KlineRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataSource for HistorySource {
    async fn klines(&self, request: &KlineRequest) -> Result<Value, CandelaError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        if self.fail_on == Some(call) {
            return Err(CandelaError::Transport(
                "Server returned status 503 for /api/v3/klines".to_string(),
            ));
        }

        let end_time = if self.ignore_end_time {
            None
        } else {
            request.end_time
        };
        let eligible: Vec<i64> = self
            .open_times
            .iter()
            .copied()
            .filter(|t| end_time.is_none_or(|end| *t <= end))
            .collect();
        let skip = eligible.len().saturating_sub(request.limit);

        let rows = eligible[skip..]
            .iter()
            .map(|t| Value::Array(kline_at(*t).fields().to_vec()))
            .collect();
        Ok(Value::Array(rows))
    }

    async fn exchange_info(&self) -> Result<Value, CandelaError> {
        Ok(self.exchange_info.clone())
    }
}

/// Replays canned kline bodies in order, then empty batches.
pub(crate) struct ScriptedSource {
    bodies: Mutex<VecDeque<Value>>,
}

impl ScriptedSource {
    pub(crate) fn new(bodies: Vec<Value>) -> Self {
        Self {
            bodies: Mutex::new(bodies.into()),
        }
    }
}

#[async_trait]
impl MarketDataSource for ScriptedSource {
    async fn klines(&self, _request: &KlineRequest) -> Result<Value, CandelaError> {
        Ok(self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json!([])))
    }

    async fn exchange_info(&self) -> Result<Value, CandelaError> {
        Err(CandelaError::Transport("not scripted".to_string()))
    }
}
