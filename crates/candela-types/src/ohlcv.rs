//! Normalized OHLCV rows and tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CandelaError;

/// Names of the six canonical columns, in order.
pub const OHLCV_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// OHLCV bar (candlestick) data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bar open time (start of the period).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Base-asset volume traded during the period.
    pub volume: f64,
}

impl Ohlcv {
    /// Creates a new OHLCV bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the open time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn open_time_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the OHLC relations hold and volume is non-negative.
    ///
    /// `high >= max(open, close)`, `low <= min(open, close)`, `high >= low`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
            && self.high >= self.low
            && self.volume >= 0.0
    }

    /// Returns the value of a numeric core field by column name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "open" => Some(self.open),
            "high" => Some(self.high),
            "low" => Some(self.low),
            "close" => Some(self.close),
            "volume" => Some(self.volume),
            _ => None,
        }
    }
}

/// A named column computed from the core fields.
///
/// `None` marks a row where the value is undefined, e.g. the first log return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    name: String,
    values: Vec<Option<f64>>,
}

impl DerivedColumn {
    /// Creates a new derived column.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column values.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Returns the number of values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A normalized series: six canonical columns plus any derived columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcvTable {
    rows: Vec<Ohlcv>,
    derived: Vec<DerivedColumn>,
}

impl OhlcvTable {
    /// Creates a table from normalized rows.
    #[must_use]
    pub const fn new(rows: Vec<Ohlcv>) -> Self {
        Self {
            rows,
            derived: Vec::new(),
        }
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Ohlcv] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Ohlcv> {
        self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the derived columns in insertion order.
    #[must_use]
    pub fn derived(&self) -> &[DerivedColumn] {
        &self.derived
    }

    /// Returns all column names: the six canonical ones, then derived ones.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        OHLCV_COLUMNS
            .iter()
            .copied()
            .chain(self.derived.iter().map(DerivedColumn::name))
            .collect()
    }

    /// Returns the values of a numeric column, core or derived.
    ///
    /// Returns `None` for unknown names and for `timestamp`.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        if OHLCV_COLUMNS[1..].contains(&name) {
            return Some(self.rows.iter().map(|r| r.field(name)).collect());
        }
        self.derived
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.values().to_vec())
    }

    /// Returns a copy of the table with `column` added.
    ///
    /// A derived column of the same name is replaced in place.
    ///
    /// # Errors
    ///
    /// Returns a format error if the column length differs from the row count
    /// or if the name collides with a canonical column.
    pub fn with_column(mut self, column: DerivedColumn) -> Result<Self, CandelaError> {
        if column.len() != self.rows.len() {
            return Err(CandelaError::Format(format!(
                "column '{}' has {} values, table has {} rows",
                column.name(),
                column.len(),
                self.rows.len()
            )));
        }
        if OHLCV_COLUMNS.contains(&column.name()) {
            return Err(CandelaError::Format(format!(
                "column '{}' is a canonical column",
                column.name()
            )));
        }

        match self.derived.iter_mut().find(|c| c.name() == column.name()) {
            Some(existing) => *existing = column,
            None => self.derived.push(column),
        }
        Ok(self)
    }

    /// Returns true if open times are strictly increasing.
    #[must_use]
    pub fn is_strictly_ascending(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
    }
}

impl From<Vec<Ohlcv>> for OhlcvTable {
    fn from(rows: Vec<Ohlcv>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn create_test_bar() -> Ohlcv {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Ohlcv::new(timestamp, 42_000.0, 42_500.0, 41_800.0, 42_200.0, 12.5)
    }

    fn create_test_table(n: usize) -> OhlcvTable {
        let base = create_test_bar();
        (0..n)
            .map(|i| Ohlcv {
                timestamp: base.timestamp + TimeDelta::minutes(i as i64 * 5),
                ..base
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_range() {
        let bar = create_test_bar();
        assert!((bar.range() - 700.0).abs() < 1e-10);
    }

    #[test]
    fn test_consistency() {
        let bar = create_test_bar();
        assert!(bar.is_consistent());
        assert!(bar.is_bullish());

        let broken = Ohlcv {
            high: 41_000.0,
            ..bar
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_column_names() {
        let table = create_test_table(3)
            .with_column(DerivedColumn::new("log_close", vec![Some(1.0); 3]))
            .unwrap();
        assert_eq!(
            table.column_names(),
            vec!["timestamp", "open", "high", "low", "close", "volume", "log_close"]
        );
    }

    #[test]
    fn test_with_column_replaces_same_name() {
        let table = create_test_table(2)
            .with_column(DerivedColumn::new("x", vec![Some(1.0), Some(2.0)]))
            .unwrap()
            .with_column(DerivedColumn::new("x", vec![None, Some(3.0)]))
            .unwrap();
        assert_eq!(table.derived().len(), 1);
        assert_eq!(table.values("x").unwrap(), vec![None, Some(3.0)]);
    }

    #[test]
    fn test_with_column_rejects_length_mismatch() {
        let result = create_test_table(2).with_column(DerivedColumn::new("x", vec![Some(1.0)]));
        assert!(matches!(result, Err(CandelaError::Format(_))));
    }

    #[test]
    fn test_with_column_rejects_canonical_name() {
        let result =
            create_test_table(1).with_column(DerivedColumn::new("close", vec![Some(1.0)]));
        assert!(result.is_err());
    }

    #[test]
    fn test_values_lookup() {
        let table = create_test_table(2);
        assert_eq!(
            table.values("close").unwrap(),
            vec![Some(42_200.0), Some(42_200.0)]
        );
        assert!(table.values("timestamp").is_none());
        assert!(table.values("vwap").is_none());
        assert!(table.is_strictly_ascending());
    }
}
