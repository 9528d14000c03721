//! Raw exchange klines and the series normalizer.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CandelaError, Ohlcv, OhlcvTable};

/// One candlestick row as delivered by the exchange.
///
/// The exchange sends each kline as a JSON array:
/// - `[0]` open time (integer milliseconds since the Unix epoch)
/// - `[1..=5]` open, high, low, close, volume (decimal strings)
/// - `[6..]` close time, quote volume, trade count, taker volumes, reserved
///
/// Only the first six fields are read; the trailer is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kline(Vec<Value>);

impl Kline {
    /// Number of leading fields that carry OHLCV data.
    pub const OHLCV_FIELDS: usize = 6;

    /// Creates a kline from its raw fields.
    #[must_use]
    pub const fn new(fields: Vec<Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw fields.
    #[must_use]
    pub fn fields(&self) -> &[Value] {
        &self.0
    }

    /// Returns the number of raw fields.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.0.len()
    }

    /// Returns the open time in milliseconds, if the first field is an integer.
    ///
    /// Accepts a JSON integer or a string holding one.
    #[must_use]
    pub fn open_time_ms(&self) -> Option<i64> {
        match self.0.first()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Converts this row into a normalized [`Ohlcv`] bar.
    ///
    /// # Errors
    ///
    /// Returns a format error if the row has fewer than six fields, the open
    /// time is not an integer millisecond timestamp, or a price/volume field
    /// is not a finite number.
    pub fn normalize(&self) -> Result<Ohlcv, CandelaError> {
        if self.width() < Self::OHLCV_FIELDS {
            return Err(CandelaError::Format(format!(
                "kline has {} fields, expected at least {}",
                self.width(),
                Self::OHLCV_FIELDS
            )));
        }

        let ms = self.open_time_ms().ok_or_else(|| {
            CandelaError::Format(format!("invalid open time: {}", self.0[0]))
        })?;
        let timestamp = DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| CandelaError::Format(format!("open time out of range: {ms}")))?;

        Ok(Ohlcv::new(
            timestamp,
            self.number(1, "open")?,
            self.number(2, "high")?,
            self.number(3, "low")?,
            self.number(4, "close")?,
            self.number(5, "volume")?,
        ))
    }

    /// Coerces the field at `idx` to a finite `f64`.
    fn number(&self, idx: usize, name: &str) -> Result<f64, CandelaError> {
        let value = match &self.0[idx] {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| CandelaError::Format(format!("{name} is not numeric: {}", self.0[idx])))
    }
}

impl From<Vec<Value>> for Kline {
    fn from(fields: Vec<Value>) -> Self {
        Self(fields)
    }
}

impl From<Ohlcv> for Kline {
    /// Rebuilds a six-field row from a normalized bar.
    fn from(bar: Ohlcv) -> Self {
        Self(vec![
            Value::from(bar.open_time_ms()),
            Value::from(bar.open),
            Value::from(bar.high),
            Value::from(bar.low),
            Value::from(bar.close),
            Value::from(bar.volume),
        ])
    }
}

/// Normalizes an assembled series into the canonical six-column table.
///
/// Trailer fields are discarded, the open time becomes a UTC timestamp, and
/// the five numeric fields become `f64`. Row order is preserved.
///
/// # Errors
///
/// Returns a format error on the first malformed row.
pub fn normalize(series: &[Kline]) -> Result<OhlcvTable, CandelaError> {
    series
        .iter()
        .map(Kline::normalize)
        .collect::<Result<Vec<_>, _>>()
        .map(OhlcvTable::new)
}
